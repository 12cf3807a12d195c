//! Shape generation for 2D primitives
//!
//! Everything returns a triangle list in playfield pixels (y down).
//! Rotations are in degrees, clockwise on screen.

use glam::Vec2;
use std::f32::consts::{FRAC_1_SQRT_2, PI};

use super::vertex::{Vertex, colors::fade};
use crate::sim::ShapeKind;

/// Point on a circle, angle in radians
#[inline]
fn on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

fn push_triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Single triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(3);
    push_triangle(&mut vertices, a, b, c, color);
    vertices
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_rect(min, size, color, color)
}

/// Rectangle shaded from `top` to `bottom`
pub fn gradient_rect(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Regular polygon as a fan around `center`; the first corner sits at
/// `start_deg`
pub fn polygon(center: Vec2, radius: f32, sides: u32, start_deg: f32, color: [f32; 4]) -> Vec<Vertex> {
    let sides = sides.max(3);
    let start = start_deg.to_radians();
    let mut vertices = Vec::with_capacity((sides * 3) as usize);

    for i in 0..sides {
        let theta1 = start + (i as f32 / sides as f32) * 2.0 * PI;
        let theta2 = start + ((i + 1) as f32 / sides as f32) * 2.0 * PI;
        push_triangle(
            &mut vertices,
            center,
            on_circle(center, radius, theta1),
            on_circle(center, radius, theta2),
            color,
        );
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    polygon(center, radius, segments, 0.0, color)
}

/// Star with `points` tips alternating between the outer and inner radius
pub fn star(
    center: Vec2,
    outer_radius: f32,
    inner_radius: f32,
    points: u32,
    rotation_deg: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let corners = points.max(2) * 2;
    let start = (rotation_deg - 90.0).to_radians();
    let mut vertices = Vec::with_capacity((corners * 3) as usize);

    for i in 0..corners {
        let r1 = if i % 2 == 0 { outer_radius } else { inner_radius };
        let r2 = if i % 2 == 0 { inner_radius } else { outer_radius };
        let theta1 = start + (i as f32 / corners as f32) * 2.0 * PI;
        let theta2 = start + ((i + 1) as f32 / corners as f32) * 2.0 * PI;
        push_triangle(
            &mut vertices,
            center,
            on_circle(center, r1, theta1),
            on_circle(center, r2, theta2),
            color,
        );
    }

    vertices
}

/// Upward spike standing on `base_left`
pub fn spike(base_left: Vec2, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    triangle(
        base_left,
        base_left + Vec2::new(width, 0.0),
        base_left + Vec2::new(width / 2.0, -height),
        color,
    )
}

/// Toothed circular blade
pub fn saw_blade(
    center: Vec2,
    radius: f32,
    rotation_deg: f32,
    blade: [f32; 4],
    hub: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let teeth = 12;
    let mut vertices = star(center, radius, radius * 0.8, teeth, rotation_deg, blade);
    vertices.extend(circle(center, radius * 0.8, blade, segments));
    vertices.extend(circle(center, radius * 0.25, hub, segments / 2));
    vertices
}

/// The player's outline: `kind` fitted into a `size`-wide box centered on
/// `center`, turned by `rotation_deg`
pub fn shape(
    kind: ShapeKind,
    center: Vec2,
    size: f32,
    rotation_deg: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let half = size / 2.0;
    match kind {
        ShapeKind::Square => polygon(center, half / FRAC_1_SQRT_2, 4, rotation_deg + 45.0, color),
        ShapeKind::Circle => circle(center, half, color, segments),
        ShapeKind::Triangle => polygon(center, half, 3, rotation_deg - 90.0, color),
        ShapeKind::Diamond => polygon(center, half, 4, rotation_deg - 90.0, color),
        ShapeKind::Hexagon => polygon(center, half, 6, rotation_deg, color),
        ShapeKind::Star => star(center, half, half * 0.45, 5, rotation_deg, color),
    }
}

/// Soft halo behind a shape: enlarged copies with falling alpha
pub fn glow(
    kind: ShapeKind,
    center: Vec2,
    size: f32,
    rotation_deg: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let layers = [(1.6, 0.12), (1.35, 0.2), (1.15, 0.3)];
    let mut vertices = Vec::new();
    for (scale, alpha) in layers {
        vertices.extend(shape(kind, center, size * scale, rotation_deg, fade(color, alpha), segments));
    }
    vertices
}

/// Bounding box of a vertex list as (min, max)
pub fn bounds(vertices: &[Vertex]) -> Option<(Vec2, Vec2)> {
    let first = vertices.first()?;
    let start = Vec2::from(first.position);
    Some(vertices.iter().fold((start, start), |(min, max), v| {
        let p = Vec2::from(v.position);
        (min.min(p), max.max(p))
    }))
}
