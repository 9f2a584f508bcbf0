//! Shape generation for 2D primitives
//!
//! Everything is emitted in world units. Filled shapes are triangle lists,
//! outlines are line lists (one vertex pair per segment).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::*;
use crate::sim::Flipper;

/// Segments used for the ball and obstacles
pub const CIRCLE_SEGMENTS: u32 = 20;

/// Append a filled circle as a triangle list
pub fn push_circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    push_circle(&mut vertices, center, radius, color, segments);
    vertices
}

/// World-space corners of a flipper body, counter-clockwise from the pivot side
pub fn flipper_corners(flipper: &Flipper, half_height: f32) -> [Vec2; 4] {
    let (x_min, x_max) = flipper.local_x_range();
    [
        Vec2::new(x_min, -half_height),
        Vec2::new(x_max, -half_height),
        Vec2::new(x_max, half_height),
        Vec2::new(x_min, half_height),
    ]
    .map(|local| flipper.to_world(local))
}

/// Append a flipper body as two triangles
pub fn push_flipper(out: &mut Vec<Vertex>, flipper: &Flipper, half_height: f32, color: [f32; 4]) {
    let [a, b, c, d] = flipper_corners(flipper, half_height);
    for p in [a, b, c, a, c, d] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Append a closed outline as a line list
pub fn push_line_loop(out: &mut Vec<Vertex>, points: &[Vec2], color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    out.reserve(points.len() * 2);
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        out.push(Vertex::new(p.x, p.y, color));
        out.push(Vertex::new(q.x, q.y, color));
    }
}

/// Wall outlines: left wall, right wall below the launch lane opening,
/// right wall cap above it, top wall, and the two floor pits that lead
/// into each flipper pivot.
pub fn wall_outlines(left_pivot: Vec2, right_pivot: Vec2) -> Vec<Vec<Vec2>> {
    let inner_left = WALL_LEFT + SIDE_WALL_THICKNESS;
    let inner_right = WALL_RIGHT - SIDE_WALL_THICKNESS;
    let lane_bottom = WALL_TOP - LANE_OPENING_BOTTOM;
    let lane_top = WALL_TOP - LANE_OPENING_TOP;
    let pit_top = WALL_BOTTOM + PIT_HEIGHT;
    // Pit outlines run well below the table so they read as open shafts
    let pit_depth = WALL_BOTTOM - 2.0;

    vec![
        vec![
            Vec2::new(WALL_LEFT, WALL_BOTTOM),
            Vec2::new(inner_left, WALL_BOTTOM),
            Vec2::new(inner_left, WALL_TOP),
            Vec2::new(WALL_LEFT, WALL_TOP),
        ],
        vec![
            Vec2::new(inner_right, WALL_BOTTOM),
            Vec2::new(WALL_RIGHT, WALL_BOTTOM),
            Vec2::new(WALL_RIGHT, lane_bottom),
            Vec2::new(inner_right, lane_bottom),
        ],
        vec![
            Vec2::new(inner_right, lane_top),
            Vec2::new(WALL_RIGHT, lane_top),
            Vec2::new(WALL_RIGHT, WALL_TOP),
            Vec2::new(inner_right, WALL_TOP),
        ],
        vec![
            Vec2::new(inner_left, lane_top),
            Vec2::new(inner_right, lane_top),
            Vec2::new(inner_right, WALL_TOP),
            Vec2::new(inner_left, WALL_TOP),
        ],
        vec![
            Vec2::new(WALL_LEFT, pit_depth),
            Vec2::new(WALL_LEFT, pit_top),
            left_pivot,
        ],
        vec![
            Vec2::new(WALL_RIGHT, pit_depth),
            Vec2::new(WALL_RIGHT, pit_top),
            right_pivot,
        ],
    ]
}

/// Append every wall outline as lines
pub fn push_walls(out: &mut Vec<Vertex>, left_pivot: Vec2, right_pivot: Vec2, color: [f32; 4]) {
    for outline in wall_outlines(left_pivot, right_pivot) {
        push_line_loop(out, &outline, color);
    }
}
