// Math utilities for the cube inspector

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Represents a 3D transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Create a new transform
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a transform placed at `position` with no rotation and unit scale
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Generate transformation matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.orientation(),
            self.position,
        )
    }
}

/// A ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Ray test against the unit box `[-0.5, 0.5]^3` placed in the world by
/// `model`. The ray is moved into the box's local space with the inverse
/// matrix, so rotation and non-uniform scale are honored. The local
/// direction is not renormalized, which keeps the returned parameter in
/// world units.
pub fn ray_unit_box(ray: &Ray, model: Mat4) -> Option<f32> {
    if model.determinant().abs() <= f32::EPSILON {
        return None;
    }
    let inverse = model.inverse();
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);
    let inv_dir = direction.recip();

    let t1 = (Vec3::splat(-0.5) - origin) * inv_dir;
    let t2 = (Vec3::splat(0.5) - origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}
