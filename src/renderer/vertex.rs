//! Vertex format and palette

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Straight (non-premultiplied) RGBA
pub type Rgba = [f32; 4];

/// Canvas-space vertex; the shader maps it to clip space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn at(p: Vec2, color: Rgba) -> Self {
        Self {
            position: p.to_array(),
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Palette
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const PLATFORM: Rgba = [0.0, 1.0, 0.0, 1.0];
    /// Collapsing platform counting down
    pub const PLATFORM_ARMED: Rgba = [0.6, 0.9, 0.1, 1.0];
    pub const ENEMY: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const GOAL: Rgba = [1.0, 1.0, 0.0, 1.0];
    /// Body tint per sprite frame
    pub const PLAYER: [Rgba; 2] = [[0.3, 0.6, 1.0, 1.0], [0.2, 0.5, 0.9, 1.0]];
    pub const PLAYER_EYE: Rgba = [1.0; 4];
    pub const PARTICLE: Rgba = [1.0; 4];
}
