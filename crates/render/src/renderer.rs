use planeview_camera::OrbitCamera;
use planeview_mesh::GridMesh;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads static geometry and the current camera state, then
/// produces output. It never mutates either — the camera is owned by the
/// input layer and the mesh is immutable after construction.
pub trait SceneRenderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given geometry and camera state.
    fn render(&self, mesh: &GridMesh, camera: &OrbitCamera) -> Self::Output;
}

/// Debug text renderer for headless contexts.
///
/// Produces a human-readable description of the scene: buffer sizes,
/// triangle count, camera orientation. Used by the CLI and for testing
/// the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SceneRenderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, mesh: &GridMesh, camera: &OrbitCamera) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene ({}x{} lattice) ===\n",
            mesh.resolution_x(),
            mesh.resolution_y()
        ));
        out.push_str(&format!(
            "Vertices: {} ({} floats each)\n",
            mesh.vertex_count(),
            planeview_mesh::VERTEX_STRIDE_FLOATS
        ));
        out.push_str(&format!(
            "Indices: {} ({} triangles)\n",
            mesh.index_count(),
            mesh.triangle_count()
        ));
        out.push_str(&format!(
            "Camera: azimuth={:.1} elevation={:.1} radius={:.2}\n",
            camera.azimuth, camera.elevation, camera.radius
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renderer_reports_buffer_stats() {
        let mesh = GridMesh::build(4, 4).unwrap();
        let camera = OrbitCamera::default();
        let output = DebugTextRenderer::new().render(&mesh, &camera);

        assert!(output.contains("4x4 lattice"));
        assert!(output.contains("Vertices: 16"));
        assert!(output.contains("Indices: 54 (18 triangles)"));
    }

    #[test]
    fn debug_renderer_reports_camera_state() {
        let mesh = GridMesh::build(2, 2).unwrap();
        let mut camera = OrbitCamera::default();
        camera.zoom(0.3);
        let output = DebugTextRenderer::new().render(&mesh, &camera);

        assert!(output.contains("radius=1.50"));
    }
}
