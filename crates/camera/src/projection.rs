use glam::Mat4;

/// Perspective projection parameters, composed with a view matrix into the
/// single transform the renderer uploads each frame.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl Projection {
    /// Build `projection * view` for the given viewport.
    ///
    /// A zero-height viewport is a caller bug; the frame driver clamps
    /// resize events to at least 1x1 before they reach this point.
    pub fn compose(&self, view: Mat4, viewport_width: u32, viewport_height: u32) -> Mat4 {
        assert!(viewport_height > 0, "viewport height must be positive");
        let aspect = viewport_width as f32 / viewport_height as f32;
        let proj = Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.z_near, self.z_far);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn compose_is_projection_times_view() {
        let projection = Projection::default();
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.8));
        let composed = projection.compose(view, 800, 600);
        let expected = Mat4::perspective_rh(45.0_f32.to_radians(), 800.0 / 600.0, 0.1, 100.0) * view;
        assert!(composed.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn aspect_follows_viewport() {
        let projection = Projection::default();
        let wide = projection.compose(Mat4::IDENTITY, 1600, 400);
        let square = projection.compose(Mat4::IDENTITY, 400, 400);
        // The x focal term shrinks as the viewport widens.
        assert!(wide.col(0).x < square.col(0).x);
    }

    #[test]
    fn identity_view_passes_through() {
        let projection = Projection {
            fov_y_degrees: 60.0,
            z_near: 0.5,
            z_far: 50.0,
        };
        let composed = projection.compose(Mat4::IDENTITY, 400, 400);
        let proj = Mat4::perspective_rh(60.0_f32.to_radians(), 1.0, 0.5, 50.0);
        assert!(composed.abs_diff_eq(proj, 1e-6));
    }

    #[test]
    #[should_panic(expected = "viewport height")]
    fn zero_height_viewport_panics() {
        Projection::default().compose(Mat4::IDENTITY, 800, 0);
    }
}
