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

/// Flat colors standing in for each texture
pub mod colors {
    pub const SEA: [f32; 4] = [0.05, 0.25, 0.45, 1.0];
    pub const ROCK: [f32; 4] = [0.12, 0.18, 0.28, 1.0];
    pub const LAND: [f32; 4] = [0.76, 0.66, 0.42, 1.0];
    pub const CEILING: [f32; 4] = [0.35, 0.3, 0.25, 1.0];
    pub const CORAL: [f32; 4] = [0.95, 0.45, 0.45, 1.0];
    pub const SHRIMP: [f32; 4] = [1.0, 0.55, 0.35, 1.0];
    pub const GAME_OVER: [f32; 4] = [0.9, 0.9, 0.95, 0.9];
    pub const LABEL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const MISSING: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.08, 0.15, 1.0];

    /// Color for a texture by name
    pub fn for_texture(name: &str) -> [f32; 4] {
        match name {
            "background" => SEA,
            "rock_under" | "rock_above" => ROCK,
            "land" => LAND,
            "ceiling" => CEILING,
            "coral_under" | "coral_above" => CORAL,
            "gameover" => GAME_OVER,
            n if n.starts_with("shrimp") => SHRIMP,
            _ => MISSING,
        }
    }
}
