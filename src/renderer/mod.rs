//! CPU-side mesh building
//!
//! The host owns the GPU. Each frame it calls `FrameMesh::rebuild` and
//! uploads `as_bytes()` into a vertex buffer it keeps across frames. The
//! mesh reuses its own allocation too, so a steady-state frame allocates
//! nothing.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use std::ops::Range;

use crate::sim::WorldState;

/// One frame of table geometry: triangles first, then wall lines
#[derive(Debug, Default)]
pub struct FrameMesh {
    vertices: Vec<Vertex>,
    /// Vertex range to draw as a triangle list
    pub triangles: Range<u32>,
    /// Vertex range to draw as a line list
    pub lines: Range<u32>,
}

impl FrameMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate all geometry for `state` in place
    pub fn rebuild(&mut self, state: &WorldState) {
        self.vertices.clear();
        let tuning = &state.tuning;

        for obstacle in &state.obstacles {
            shapes::push_circle(
                &mut self.vertices,
                obstacle.pos,
                obstacle.radius * tuning.game_scale,
                colors::OBSTACLE,
                shapes::CIRCLE_SEGMENTS,
            );
        }
        for flipper in [&state.left_flipper, &state.right_flipper] {
            shapes::push_flipper(
                &mut self.vertices,
                flipper,
                tuning.flipper_half_height,
                colors::FLIPPER,
            );
        }
        shapes::push_circle(
            &mut self.vertices,
            state.ball.pos,
            state.ball.scaled_radius(tuning.game_scale),
            colors::BALL,
            shapes::CIRCLE_SEGMENTS,
        );
        let triangle_end = self.vertices.len() as u32;

        shapes::push_walls(
            &mut self.vertices,
            state.left_flipper.pivot,
            state.right_flipper.pivot,
            colors::WALL,
        );
        let line_end = self.vertices.len() as u32;

        self.triangles = 0..triangle_end;
        self.lines = triangle_end..line_end;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
