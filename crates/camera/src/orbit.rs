use glam::{Mat4, Vec2, Vec3};

/// Drag sensitivity is normalized against this reference viewport so a
/// full-window drag rotates by the same amount at any resolution.
const REF_VIEWPORT: Vec2 = Vec2::new(450.0, 270.0);

/// Minimum angular change (degrees) worth applying; sub-pixel jitter
/// below this must not trigger a redraw.
const ROTATE_EPSILON: f32 = f32::EPSILON;

/// Transient pointer-drag state, created on pointer-down and dropped on
/// pointer-up.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    origin_mouse: Vec2,
    origin_angles: Vec2, // (azimuth, elevation) at drag start
}

/// Orbit camera: spherical orientation around the origin.
///
/// Azimuth and elevation are in degrees, radius is the distance from the
/// target. All mutating operations return whether the orientation actually
/// changed, which is the caller's redraw signal. No operation can fail;
/// out-of-range inputs are absorbed by clamping and wrapping.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub elevation: f32,
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    drag: Option<DragSession>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.0,
            radius: 1.8,
            min_radius: 0.1,
            max_radius: 10.0,
            drag: None,
        }
    }
}

/// Wrap an angle in degrees into (-180, 180].
fn wrap_azimuth(degrees: f32) -> f32 {
    let mut a = degrees % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

impl OrbitCamera {
    pub fn new(min_radius: f32, max_radius: f32) -> Self {
        let mut cam = Self {
            min_radius,
            max_radius,
            ..Self::default()
        };
        cam.radius = cam.radius.clamp(min_radius, max_radius);
        cam
    }

    /// Start a drag-rotation gesture at the given pixel position.
    /// Ignored if a drag is already in progress.
    pub fn begin_drag(&mut self, mouse_x: f32, mouse_y: f32) {
        if self.drag.is_some() {
            return;
        }
        self.drag = Some(DragSession {
            origin_mouse: Vec2::new(mouse_x, mouse_y),
            origin_angles: Vec2::new(self.azimuth, self.elevation),
        });
    }

    pub fn drag_active(&self) -> bool {
        self.drag.is_some()
    }

    /// Feed a pointer-move into an active drag. Returns true if the
    /// orientation changed and a redraw is needed.
    ///
    /// The mouse delta is converted to degrees through a scale derived
    /// from the viewport size, then re-based on the angles captured at
    /// drag start, so the gesture is stable under any intermediate event
    /// coalescing.
    pub fn update_drag(
        &mut self,
        mouse_x: f32,
        mouse_y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        let scale = (viewport_width as f32 / REF_VIEWPORT.x)
            .min(viewport_height as f32 / REF_VIEWPORT.y);
        let delta = Vec2::new(mouse_x, mouse_y) - drag.origin_mouse;
        let candidate = drag.origin_angles + delta / scale;

        let azimuth = wrap_azimuth(candidate.x);
        let elevation = candidate.y.clamp(-90.0, 90.0);

        let current = Vec2::new(self.azimuth, self.elevation);
        if (Vec2::new(azimuth, elevation) - current).length() <= ROTATE_EPSILON {
            return false;
        }
        self.azimuth = azimuth;
        self.elevation = elevation;
        true
    }

    /// End the drag gesture, if any.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Move the camera along its view axis. Positive delta zooms in.
    /// Returns true if the clamped radius changed.
    pub fn zoom(&mut self, delta: f32) -> bool {
        let next = (self.radius - delta).clamp(self.min_radius, self.max_radius);
        if next == self.radius {
            return false;
        }
        self.radius = next;
        true
    }

    /// View matrix: translate back by the radius, pitch by elevation, then
    /// yaw by azimuth. The order is load-bearing; the yaw is applied in
    /// the already-tilted frame, which is what makes the orbit feel right.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.radius))
            * Mat4::from_rotation_x(self.elevation.to_radians())
            * Mat4::from_rotation_y(self.azimuth.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orientation() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.azimuth, 0.0);
        assert_eq!(cam.elevation, 0.0);
        assert_eq!(cam.radius, 1.8);
        assert!(!cam.drag_active());
    }

    #[test]
    fn elevation_clamps_at_ninety() {
        let mut cam = OrbitCamera::default();
        cam.begin_drag(0.0, 0.0);
        // scale = 1 at the reference viewport, so pixels map 1:1 to degrees
        assert!(cam.update_drag(0.0, 120.0, 450, 270));
        assert_eq!(cam.elevation, 90.0);
    }

    #[test]
    fn azimuth_wraps_into_canonical_range() {
        let mut cam = OrbitCamera::default();
        cam.begin_drag(0.0, 0.0);
        assert!(cam.update_drag(200.0, 0.0, 450, 270));
        assert_eq!(cam.azimuth, -160.0);

        cam.end_drag();
        cam.begin_drag(0.0, 0.0);
        assert!(cam.update_drag(-90.0, 0.0, 450, 270));
        assert_eq!(cam.azimuth, wrap_azimuth(-160.0 - 90.0));
        assert_eq!(cam.azimuth, 110.0);
    }

    #[test]
    fn wrap_boundaries() {
        assert_eq!(wrap_azimuth(180.0), 180.0);
        assert_eq!(wrap_azimuth(-180.0), 180.0);
        assert_eq!(wrap_azimuth(540.0), 180.0);
        assert_eq!(wrap_azimuth(-200.0), 160.0);
    }

    #[test]
    fn zoom_saturates_at_bounds() {
        let mut cam = OrbitCamera::default();
        assert!(cam.zoom(-5.0));
        assert!(cam.zoom(-5.0));
        assert_eq!(cam.radius, 10.0);
        // Already at the bound: no change, no redraw.
        assert!(!cam.zoom(-0.1));

        assert!(cam.zoom(100.0));
        assert_eq!(cam.radius, 0.1);
        assert!(!cam.zoom(0.1));
    }

    #[test]
    fn update_without_drag_is_noop() {
        let mut cam = OrbitCamera::default();
        assert!(!cam.update_drag(50.0, 50.0, 800, 600));
        assert_eq!(cam.azimuth, 0.0);
        assert_eq!(cam.elevation, 0.0);
    }

    #[test]
    fn repeated_update_is_idempotent() {
        let mut cam = OrbitCamera::default();
        cam.begin_drag(10.0, 10.0);
        assert!(cam.update_drag(40.0, 25.0, 450, 270));
        let (az, el) = (cam.azimuth, cam.elevation);
        // Same pointer position again: orientation already matches, so the
        // camera must not signal another redraw.
        assert!(!cam.update_drag(40.0, 25.0, 450, 270));
        assert_eq!((cam.azimuth, cam.elevation), (az, el));
    }

    #[test]
    fn begin_while_active_keeps_first_origin() {
        let mut cam = OrbitCamera::default();
        cam.begin_drag(0.0, 0.0);
        cam.begin_drag(100.0, 100.0); // ignored
        assert!(cam.update_drag(30.0, 0.0, 450, 270));
        assert_eq!(cam.azimuth, 30.0);
    }

    #[test]
    fn drag_scale_tracks_viewport() {
        let mut cam = OrbitCamera::default();
        cam.begin_drag(0.0, 0.0);
        // 900x540 doubles the reference resolution, halving sensitivity.
        assert!(cam.update_drag(90.0, 0.0, 900, 540));
        assert_eq!(cam.azimuth, 45.0);
    }

    #[test]
    fn view_matrix_is_pure_translation_at_rest() {
        let cam = OrbitCamera {
            radius: 3.0,
            ..OrbitCamera::default()
        };
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn view_matrix_composition_order() {
        let cam = OrbitCamera {
            azimuth: 30.0,
            elevation: -45.0,
            radius: 2.0,
            ..OrbitCamera::default()
        };
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0))
            * Mat4::from_rotation_x((-45.0_f32).to_radians())
            * Mat4::from_rotation_y(30.0_f32.to_radians());
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-6));
        // Reversed rotation order produces a different matrix.
        let swapped = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0))
            * Mat4::from_rotation_y(30.0_f32.to_radians())
            * Mat4::from_rotation_x((-45.0_f32).to_radians());
        assert!(!cam.view_matrix().abs_diff_eq(swapped, 1e-6));
    }
}
