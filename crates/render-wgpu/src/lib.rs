//! wgpu render backend for planeview.
//!
//! Renders the textured grid plane with the per-frame view-projection
//! transform produced by the camera crate.
//!
//! # Invariants
//! - Vertex and index buffers are uploaded once, at construction.
//! - Texture pixels are uploaded once; nothing is decoded per frame.
//! - The renderer never mutates mesh or camera state.

mod gpu;
mod shaders;
mod texture;

pub use gpu::PlaneRenderer;
pub use texture::upload_rgba8;
