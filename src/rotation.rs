//! Idle spin applied to every cube the user is not looking at.

use crate::scene::{ObjectId, SceneRegistry};

/// Add `step` radians to the x and y rotation of every object except
/// `selected`.
pub fn spin_idle(registry: &mut SceneRegistry, selected: Option<ObjectId>, step: f32) {
    for obj in registry.all_mut() {
        if Some(obj.id()) == selected {
            continue;
        }
        obj.transform.rotation.x += step;
        obj.transform.rotation.y += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::{Dimensions, PickableObject};
    use glam::Vec3;

    fn registry() -> SceneRegistry {
        let objects = (1..=3)
            .map(|id| {
                PickableObject::new(ObjectId(id), Vec3::ZERO, Dimensions::cube(1.0), Color::WHITE)
                    .with_rotation(Vec3::new(0.1, 0.2, 0.3))
            })
            .collect();
        let mut registry = SceneRegistry::new();
        registry.replace(objects).unwrap();
        registry
    }

    #[test]
    fn spins_x_and_y_only() {
        let mut registry = registry();
        spin_idle(&mut registry, None, 0.005);
        for obj in registry.all() {
            approx::assert_abs_diff_eq!(obj.transform.rotation.x, 0.105, epsilon = 1e-6);
            approx::assert_abs_diff_eq!(obj.transform.rotation.y, 0.205, epsilon = 1e-6);
            assert_eq!(obj.transform.rotation.z, 0.3);
        }
    }

    #[test]
    fn selected_object_holds_still() {
        let mut registry = registry();
        for _ in 0..10 {
            spin_idle(&mut registry, Some(ObjectId(2)), 0.005);
        }
        let still = registry.get(ObjectId(2)).unwrap();
        assert_eq!(still.transform.rotation, Vec3::new(0.1, 0.2, 0.3));
        let spun = registry.get(ObjectId(1)).unwrap();
        approx::assert_abs_diff_eq!(spun.transform.rotation.x, 0.15, epsilon = 1e-5);
    }
}
