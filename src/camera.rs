//! Perspective camera and the orbit controller that drives it.

use glam::{Mat4, Vec2, Vec3};

use crate::math::Ray;
use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh uses the [0,1] depth range wgpu expects
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Right-handed screen basis: (forward, right, up).
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Ray from the eye through a point given in normalized device
    /// coordinates (`x` right, `y` up, both in `[-1, 1]`).
    ///
    /// Returns `None` for coordinates outside the viewport or a degenerate
    /// camera.
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        if !ndc.is_finite() || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }
        let (forward, right, up) = self.basis();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return None;
        }

        let half_h = (0.5 * self.fovy.to_radians()).tan();
        let half_w = half_h * self.aspect;
        let dir = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);

        Some(Ray::new(self.eye, dir))
    }
}

/// Convert a cursor position in physical pixels to normalized device
/// coordinates, y flipped so up is positive.
pub fn cursor_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vec2::new((x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0))
}

/// Orbit camera circling a target point, controlled by yaw, pitch and
/// distance.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    pub target: Vec3,
    options: CameraOptions,
}

const PITCH_LIMIT: f32 = 1.5;

impl OrbitCamera {
    /// Starts at the configured eye, looking at the configured target.
    pub fn new(options: &CameraOptions) -> Self {
        let target = Vec3::from_array(options.target);
        let offset = Vec3::from_array(options.eye) - target;
        let distance = offset.length();
        let (yaw, pitch) = if distance > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / distance).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: distance.clamp(options.min_distance, options.max_distance),
            target,
            options: options.clone(),
        }
    }

    /// Rotate by angle deltas in radians.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `lines` moves closer.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - self.options.zoom_step).powf(lines);
        self.distance = (self.distance * factor)
            .clamp(self.options.min_distance, self.options.max_distance);
    }

    pub fn orbit_speed(&self) -> f32 {
        self.options.orbit_speed
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Snapshot of the current view as a projection camera.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye_position(),
            target: self.target,
            up: Vec3::Y,
            aspect,
            fovy: self.options.fovy,
            znear: self.options.znear,
            zfar: self.options.zfar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn looking_down_neg_z() -> Camera {
        Camera {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 90.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn center_ray_follows_forward() {
        let ray = looking_down_neg_z().ray_through(Vec2::ZERO).unwrap();
        assert_eq!(ray.origin, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }

    #[test]
    fn corner_ray_spans_the_field_of_view() {
        // 90 degree fov at aspect 1: the top-right corner is at 45 degrees
        // on both axes.
        let ray = looking_down_neg_z().ray_through(Vec2::ONE).unwrap();
        let expected = Vec3::new(1.0, 1.0, -1.0).normalize();
        assert_abs_diff_eq!(ray.direction.x, expected.x, epsilon = 1e-5);
        assert_abs_diff_eq!(ray.direction.y, expected.y, epsilon = 1e-5);
        assert_abs_diff_eq!(ray.direction.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn out_of_range_pointer_has_no_ray() {
        let camera = looking_down_neg_z();
        assert!(camera.ray_through(Vec2::new(1.5, 0.0)).is_none());
        assert!(camera.ray_through(Vec2::new(f32::NAN, 0.0)).is_none());
    }

    #[test]
    fn ray_agrees_with_projection() {
        let camera = OrbitCamera::new(&CameraOptions::default()).camera(16.0 / 9.0);
        let ndc = Vec2::new(0.3, -0.6);
        let ray = camera.ray_through(ndc).unwrap();
        let projected = camera.build_matrix().project_point3(ray.at(10.0));
        assert_abs_diff_eq!(projected.x, ndc.x, epsilon = 1e-4);
        assert_abs_diff_eq!(projected.y, ndc.y, epsilon = 1e-4);
    }

    #[test]
    fn cursor_maps_to_ndc_with_flipped_y() {
        let ndc = cursor_to_ndc(0.0, 0.0, 800.0, 600.0).unwrap();
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = cursor_to_ndc(400.0, 600.0, 800.0, 600.0).unwrap();
        assert_eq!(ndc, Vec2::new(0.0, -1.0));
        assert!(cursor_to_ndc(1.0, 1.0, 0.0, 600.0).is_none());
    }

    #[test]
    fn orbit_starts_at_configured_eye() {
        let orbit = OrbitCamera::new(&CameraOptions::default());
        let eye = orbit.eye_position();
        assert_abs_diff_eq!(eye.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(eye.y, 5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(eye.z, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitCamera::new(&CameraOptions::default());
        orbit.zoom(100.0);
        assert_eq!(orbit.distance, 5.0);
        orbit.zoom(-100.0);
        assert_eq!(orbit.distance, 50.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut orbit = OrbitCamera::new(&CameraOptions::default());
        orbit.rotate(0.0, 10.0);
        assert_eq!(orbit.pitch, PITCH_LIMIT);
    }
}
