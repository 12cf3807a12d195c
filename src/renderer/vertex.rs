//! Vertex types for 2D rendering
//!
//! Positions are playfield pixels until the pipeline maps them to NDC.

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Fixed colors for course elements (cosmetic palettes live in `persistence::cosmetics`)
pub mod colors {
    pub const BLOCK: [f32; 4] = [0.35, 0.4, 0.55, 1.0];
    pub const BLOCK_EDGE: [f32; 4] = [0.75, 0.85, 1.0, 1.0];
    pub const SPIKE: [f32; 4] = [0.95, 0.25, 0.35, 1.0];
    pub const SAW: [f32; 4] = [0.8, 0.8, 0.85, 1.0];
    pub const SAW_HUB: [f32; 4] = [0.25, 0.25, 0.3, 1.0];
    pub const FINISH_LIGHT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FINISH_DARK: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];

    /// Same color with its alpha multiplied by `alpha`
    pub fn fade(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }
}
