//! wgpu render backend for the water grid.
//!
//! Draws one static indexed mesh with the water shader. Wave motion happens
//! entirely in the vertex stage; the host only streams uniforms.
//!
//! # Invariants
//! - Mesh buffers are uploaded once and never rewritten.
//! - Depth test (`Less`) and back-face culling with CCW front faces are always on.
//! - Device loss is reported as [`GpuError::DeviceLost`] and is not recovered.

mod backend;
mod error;
mod gpu;
mod mesh;
mod shaders;
mod uniforms;

pub use backend::WgpuBackend;
pub use error::GpuError;
pub use gpu::WgpuRenderer;
pub use mesh::GpuMesh;
pub use uniforms::{UniformBlock, WaterUniforms};
