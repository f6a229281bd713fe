use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Number of floats per vertex: 3 position + 2 texcoord.
pub const VERTEX_STRIDE_FLOATS: usize = 5;

/// One lattice vertex: position in the XY plane plus a texture coordinate.
///
/// Layout matches the GPU vertex buffer exactly (20 bytes, no padding).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
}

/// Errors from mesh construction.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("grid resolution on {axis} axis must be at least 2, got {value}")]
    ResolutionTooSmall { axis: char, value: u32 },
}

/// A rectangular grid mesh spanning the unit square in the XY plane.
///
/// Vertices are stored row-major: row `r` outer, column `c` inner, so
/// `index(r, c) = resolution_x * r + c`. Row 0 sits at the top (y = +1),
/// column 0 at the left (x = -1). The index buffer refers to this order
/// and both buffers must only ever be regenerated together.
#[derive(Debug, Clone)]
pub struct GridMesh {
    resolution_x: u32,
    resolution_y: u32,
    vertices: Vec<GridVertex>,
    indices: Vec<u32>,
}

impl GridMesh {
    /// Build a grid mesh with the given lattice resolution.
    ///
    /// Positions span [-1, 1] in X and Y. Texture coordinates divide by the
    /// point count rather than point-count - 1, so u and v never reach 1.0
    /// on the far row/column. Changing that denominator alters the rendered
    /// image; it is a product decision, not a code fix.
    ///
    /// Each quad cell is split along a fixed diagonal into two triangles
    /// with consistent winding, emitted cell by cell in row-major order.
    pub fn build(resolution_x: u32, resolution_y: u32) -> Result<Self, MeshError> {
        if resolution_x < 2 {
            return Err(MeshError::ResolutionTooSmall {
                axis: 'x',
                value: resolution_x,
            });
        }
        if resolution_y < 2 {
            return Err(MeshError::ResolutionTooSmall {
                axis: 'y',
                value: resolution_y,
            });
        }

        let rx = resolution_x as usize;
        let ry = resolution_y as usize;

        let mut vertices = Vec::with_capacity(rx * ry);
        for r in 0..ry {
            for c in 0..rx {
                let x = -1.0 + 2.0 * c as f32 / (rx - 1) as f32;
                let y = 1.0 - 2.0 * r as f32 / (ry - 1) as f32;
                let u = c as f32 / rx as f32;
                let v = 1.0 - r as f32 / ry as f32;
                vertices.push(GridVertex {
                    position: [x, y, 0.0],
                    texcoord: [u, v],
                });
            }
        }

        let index = |row: u32, col: u32| resolution_x * row + col;

        let mut indices = Vec::with_capacity(6 * (rx - 1) * (ry - 1));
        for nx in 0..resolution_y - 1 {
            for ny in 0..resolution_x - 1 {
                // Upper-left triangle, then lower-right, sharing the
                // top-right/bottom-left diagonal.
                indices.push(index(nx, ny));
                indices.push(index(nx, ny + 1));
                indices.push(index(nx + 1, ny));

                indices.push(index(nx, ny + 1));
                indices.push(index(nx + 1, ny + 1));
                indices.push(index(nx + 1, ny));
            }
        }

        Ok(Self {
            resolution_x,
            resolution_y,
            vertices,
            indices,
        })
    }

    pub fn resolution_x(&self) -> u32 {
        self.resolution_x
    }

    pub fn resolution_y(&self) -> u32 {
        self.resolution_y
    }

    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Number of triangles: two per quad cell.
    pub fn triangle_count(&self) -> u32 {
        2 * (self.resolution_x - 1) * (self.resolution_y - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sizes_match_resolution() {
        for (rx, ry) in [(2, 2), (2, 5), (4, 4), (7, 3), (32, 32)] {
            let mesh = GridMesh::build(rx, ry).unwrap();
            assert_eq!(mesh.vertex_count(), rx * ry);
            assert_eq!(mesh.index_count(), 6 * (rx - 1) * (ry - 1));
            assert_eq!(mesh.triangle_count(), 2 * (rx - 1) * (ry - 1));
        }
    }

    #[test]
    fn every_index_in_bounds() {
        for (rx, ry) in [(2, 2), (3, 8), (16, 9)] {
            let mesh = GridMesh::build(rx, ry).unwrap();
            let n = rx * ry;
            assert!(mesh.indices().iter().all(|&i| i < n));
        }
    }

    #[test]
    fn corner_positions_4x4() {
        let mesh = GridMesh::build(4, 4).unwrap();
        // row 0, col 0 -> top left
        assert_eq!(mesh.vertices()[0].position, [-1.0, 1.0, 0.0]);
        // row 3, col 3 -> bottom right
        assert_eq!(mesh.vertices()[15].position, [1.0, -1.0, 0.0]);
    }

    #[test]
    fn first_cell_winding_2x2() {
        let mesh = GridMesh::build(2, 2).unwrap();
        assert_eq!(&mesh.indices()[..3], &[0, 1, 2]);
        assert_eq!(&mesh.indices()[3..6], &[1, 3, 2]);
    }

    #[test]
    fn texcoords_divide_by_point_count() {
        let mesh = GridMesh::build(4, 4).unwrap();
        // u = c/4, v = 1 - r/4: the far edge stays short of 1.0.
        assert_eq!(mesh.vertices()[0].texcoord, [0.0, 1.0]);
        assert_eq!(mesh.vertices()[15].texcoord, [0.75, 0.25]);
    }

    #[test]
    fn consecutive_triples_cover_each_cell_twice() {
        let mesh = GridMesh::build(3, 3).unwrap();
        // 2x2 cells, 8 triangles, cell (0,0) first.
        assert_eq!(mesh.index_count(), 24);
        assert_eq!(&mesh.indices()[..6], &[0, 1, 3, 1, 4, 3]);
        // Second cell in the row shifts one column right.
        assert_eq!(&mesh.indices()[6..12], &[1, 2, 4, 2, 5, 4]);
    }

    #[test]
    fn rejects_degenerate_resolution() {
        assert!(GridMesh::build(1, 4).is_err());
        assert!(GridMesh::build(4, 0).is_err());
        assert!(GridMesh::build(2, 2).is_ok());
    }

    #[test]
    fn vertex_stride_is_five_floats() {
        assert_eq!(
            std::mem::size_of::<GridVertex>(),
            VERTEX_STRIDE_FLOATS * std::mem::size_of::<f32>()
        );
    }
}
