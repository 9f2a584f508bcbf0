//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride between vertices in an uploaded buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for table elements
pub mod colors {
    pub const BALL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const FLIPPER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const WALL: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
}
