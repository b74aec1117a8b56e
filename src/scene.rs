// Scene registry for the cube inspector

use std::collections::HashSet;
use std::f32::consts::TAU;
use std::fmt;

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::color::Color;
use crate::error::CubeError;
use crate::math::Transform;
use crate::options::SceneOptions;

/// Identity of a pickable object within one registry generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Edge lengths of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn cube(edge: f32) -> Self {
        Self::new(edge, edge, edge)
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// A box the user can pick.
///
/// The id, size and base color are fixed for the lifetime of the object;
/// the transform and the current color/emissive are what effects touch.
#[derive(Debug, Clone, PartialEq)]
pub struct PickableObject {
    id: ObjectId,
    size: Dimensions,
    base_color: Color,
    pub transform: Transform,
    pub color: Color,
    pub emissive: Color,
}

impl PickableObject {
    /// Creates an unrotated object at `position` with its base color applied.
    pub fn new(id: ObjectId, position: Vec3, size: Dimensions, color: Color) -> Self {
        Self {
            id,
            size,
            base_color: color,
            transform: Transform::at(position),
            color,
            emissive: color.scaled(0.1),
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    /// Maps the unit box `[-0.5, 0.5]^3` onto this object, size included.
    /// Shared by drawing and picking so both see the same volume.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix() * Mat4::from_scale(self.size.to_vec3())
    }

    fn random<R: Rng + ?Sized>(id: ObjectId, spawn: &SceneOptions, rng: &mut R) -> Self {
        let mut axis = |lo: f32, hi: f32| rng.random_range(lo..hi);
        let size = Dimensions::new(
            axis(spawn.size_min, spawn.size_max),
            axis(spawn.size_min, spawn.size_max),
            axis(spawn.size_min, spawn.size_max),
        );
        let position = Vec3::new(
            axis(spawn.spawn_min[0], spawn.spawn_max[0]),
            axis(spawn.spawn_min[1], spawn.spawn_max[1]),
            axis(spawn.spawn_min[2], spawn.spawn_max[2]),
        );
        let rotation = Vec3::new(axis(0.0, TAU), axis(0.0, TAU), axis(0.0, TAU));
        let color = spawn.palette[rng.random_range(0..spawn.palette.len())];

        Self::new(id, position, size, color).with_rotation(rotation)
    }
}

/// Owns every pickable object of the current generation.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: Vec<PickableObject>,
    generation: u64,
}

impl SceneRegistry {
    /// Creates an empty registry at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Throws away every object and generates `count` random ones with
    /// ids `1..=count`. Returns the new generation.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        spawn: &SceneOptions,
        rng: &mut R,
    ) -> Result<u64, CubeError> {
        if count > 0 {
            spawn.validate()?;
        }
        let last = u32::try_from(count).map_err(|_| {
            CubeError::InvalidParameter(format!("cube count {count} is too large"))
        })?;
        let objects = (1..=last)
            .map(|id| PickableObject::random(ObjectId(id), spawn, rng))
            .collect();
        self.replace(objects)
    }

    /// Swaps in a caller-built set of objects. Ids must be pairwise distinct.
    pub fn replace(&mut self, objects: Vec<PickableObject>) -> Result<u64, CubeError> {
        let mut seen = HashSet::with_capacity(objects.len());
        if let Some(dup) = objects.iter().map(PickableObject::id).find(|id| !seen.insert(*id)) {
            return Err(CubeError::PreconditionViolation(dup));
        }
        self.objects = objects;
        self.generation += 1;
        Ok(self.generation)
    }

    /// Iterates the current objects in registry order. The iterator can be
    /// cloned to walk the same generation again.
    pub fn all(&self) -> std::slice::Iter<'_, PickableObject> {
        self.objects.iter()
    }

    pub(crate) fn all_mut(&mut self) -> std::slice::IterMut<'_, PickableObject> {
        self.objects.iter_mut()
    }

    pub fn get(&self, id: ObjectId) -> Result<&PickableObject, CubeError> {
        self.objects
            .iter()
            .find(|obj| obj.id == id)
            .ok_or(CubeError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Result<&mut PickableObject, CubeError> {
        self.objects
            .iter_mut()
            .find(|obj| obj.id == id)
            .ok_or(CubeError::NotFound(id))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_ok()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_registry(count: usize, seed: u64) -> SceneRegistry {
        let mut registry = SceneRegistry::new();
        let mut rng = StdRng::seed_from_u64(seed);
        registry
            .reset(count, &SceneOptions::default(), &mut rng)
            .unwrap();
        registry
    }

    #[test]
    fn reset_creates_requested_objects_with_distinct_ids() {
        let registry = seeded_registry(20, 1);
        assert_eq!(registry.len(), 20);
        let ids: HashSet<_> = registry.all().map(PickableObject::id).collect();
        assert_eq!(ids.len(), 20);
        assert!(ids.contains(&ObjectId(1)) && ids.contains(&ObjectId(20)));
    }

    #[test]
    fn random_objects_respect_bounds_and_palette() {
        let spawn = SceneOptions::default();
        let registry = seeded_registry(200, 2);
        for obj in registry.all() {
            let p = obj.transform.position;
            assert!((-10.0..10.0).contains(&p.x));
            assert!((-3.0..7.0).contains(&p.y));
            assert!((-10.0..10.0).contains(&p.z));
            for edge in obj.size().to_vec3().to_array() {
                assert!((0.5..2.5).contains(&edge));
            }
            assert!(spawn.palette.contains(&obj.base_color()));
            assert_eq!(obj.color, obj.base_color());
            assert_eq!(obj.transform.scale, Vec3::ONE);
        }
    }

    #[test]
    fn reset_replaces_previous_generation() {
        let mut registry = seeded_registry(20, 3);
        let first: Vec<_> = registry.all().cloned().collect();
        let mut rng = StdRng::seed_from_u64(4);
        let generation = registry
            .reset(5, &SceneOptions::default(), &mut rng)
            .unwrap();
        assert_eq!(generation, 2);
        assert_eq!(registry.generation(), 2);
        assert_eq!(registry.len(), 5);
        let second: Vec<_> = registry.all().cloned().collect();
        assert_ne!(first[..5], second[..]);
    }

    #[test]
    fn all_is_restartable() {
        let registry = seeded_registry(6, 5);
        let iter = registry.all();
        let first: Vec<_> = iter.clone().map(PickableObject::id).collect();
        let second: Vec<_> = iter.map(PickableObject::id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let registry = seeded_registry(3, 6);
        assert!(registry.get(ObjectId(2)).is_ok());
        assert!(matches!(
            registry.get(ObjectId(99)),
            Err(CubeError::NotFound(ObjectId(99)))
        ));
    }

    #[test]
    fn replace_rejects_duplicate_ids() {
        let mut registry = SceneRegistry::new();
        let color = Color::from_rgb_hex(0xFF5733);
        let objects = vec![
            PickableObject::new(ObjectId(1), Vec3::ZERO, Dimensions::cube(1.0), color),
            PickableObject::new(ObjectId(1), Vec3::X, Dimensions::cube(1.0), color),
        ];
        assert!(matches!(
            registry.replace(objects),
            Err(CubeError::PreconditionViolation(ObjectId(1)))
        ));
        assert_eq!(registry.generation(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn empty_palette_is_rejected() {
        let mut registry = SceneRegistry::new();
        let spawn = SceneOptions {
            palette: Vec::new(),
            ..SceneOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert!(registry.reset(3, &spawn, &mut rng).is_err());
    }

    #[test]
    fn new_object_emits_a_tenth_of_its_color() {
        let obj = PickableObject::new(
            ObjectId(1),
            Vec3::ZERO,
            Dimensions::cube(1.0),
            Color::WHITE,
        );
        assert_eq!(obj.emissive, Color::from_rgb_hex(0x1A1A1A));
    }

    #[test]
    fn model_matrix_includes_size() {
        let obj = PickableObject::new(
            ObjectId(1),
            Vec3::new(1.0, 2.0, 3.0),
            Dimensions::new(2.0, 4.0, 6.0),
            Color::WHITE,
        );
        let corner = obj.model_matrix().transform_point3(Vec3::splat(0.5));
        assert_eq!(corner, Vec3::new(2.0, 4.0, 6.0));
    }
}
