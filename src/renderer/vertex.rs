//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    pub const GRASS: [f32; 4] = [0.13, 0.55, 0.13, 1.0];
    pub const ROAD: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const RIVER: [f32; 4] = [0.12, 0.56, 1.0, 1.0];
    pub const RAIL_BED: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const ROAD_DASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TREE: [f32; 4] = [0.0, 0.39, 0.0, 1.0];
    pub const CAR: [f32; 4] = [0.86, 0.08, 0.24, 1.0];
    pub const TRUCK: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const WINDOW: [f32; 4] = [0.53, 0.81, 0.98, 1.0];
    pub const LOG: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const LOG_GRAIN: [f32; 4] = [0.39, 0.2, 0.0, 1.0];
    pub const TRAIN: [f32; 4] = [0.0, 0.39, 0.0, 1.0];
    pub const TRAIN_WINDOW: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const WARNING: [f32; 4] = [0.86, 0.08, 0.24, 0.35];
    pub const PLAYER: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const BEAK: [f32; 4] = [1.0, 0.55, 0.0, 1.0];
    pub const EYE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
