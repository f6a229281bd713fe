//! Grid Mesh: procedural lattice mesh for the textured view plane.
//!
//! # Invariants
//! - Vertex order is row-major and is the index space of the index buffer.
//! - Buffers are immutable once built; regeneration is the only mutation.
//! - Every index references a vertex inside the lattice.

pub mod grid;

pub use grid::{GridMesh, GridVertex, MeshError, VERTEX_STRIDE_FLOATS};
