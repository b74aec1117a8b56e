//! Pointer-to-object ray picking.

use glam::Vec2;

use crate::camera::Camera;
use crate::math::{ray_unit_box, Ray};
use crate::scene::{ObjectId, PickableObject, SceneRegistry};

/// Distances closer than this count as a tie.
pub const TIE_EPSILON: f32 = 1e-4;

/// The closest object under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: ObjectId,
    /// Position in registry iteration order.
    pub index: usize,
    /// Distance from the ray origin in world units.
    pub distance: f32,
}

/// Intersect `ray` with every object's bounding box and keep the nearest.
///
/// Every hit within [`TIE_EPSILON`] of the minimum distance counts as a tie
/// and the one seen first wins, so the result only depends on the inputs
/// and the iteration order.
pub fn pick_nearest<'a, I>(ray: &Ray, objects: I) -> Option<Hit>
where
    I: IntoIterator<Item = &'a PickableObject>,
{
    let hits: Vec<Hit> = objects
        .into_iter()
        .enumerate()
        .filter_map(|(index, obj)| {
            ray_unit_box(ray, obj.model_matrix()).map(|distance| Hit {
                id: obj.id(),
                index,
                distance,
            })
        })
        .collect();

    let nearest = hits.iter().map(|h| h.distance).reduce(f32::min)?;
    hits.into_iter().find(|h| h.distance - nearest <= TIE_EPSILON)
}

/// Cast a ray from normalized pointer coordinates into the registry.
pub fn pick(ndc: Vec2, camera: &Camera, registry: &SceneRegistry) -> Option<Hit> {
    let ray = camera.ray_through(ndc)?;
    let hit = pick_nearest(&ray, registry.all());
    log::debug!(
        "pick at ({:.3}, {:.3}): {:?}",
        ndc.x,
        ndc.y,
        hit.map(|h| (h.id, h.distance))
    );
    hit
}
