//! WebGPU rendering module
//!
//! `scene` builds canvas-space vertices from the session; `pipeline` owns the
//! GPU objects and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, RendererError};
pub use scene::{build_scene, shake_offset};
pub use vertex::Vertex;
