//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate mesh or camera state.
//! - Geometry is uploaded once; only the transform changes per frame.
//!
//! Provides a trait-based renderer interface with a debug text renderer
//! for headless use (CLI, tests). The GPU backend in planeview-render-wgpu
//! drives the same mesh and camera types directly, since it needs
//! device/queue/surface context per call.

mod renderer;

pub use renderer::{DebugTextRenderer, SceneRenderer};

pub fn crate_info() -> &'static str {
    "planeview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
