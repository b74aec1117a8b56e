//! Transient bounce effects advanced by an external frame tick.
//!
//! A bounce is a plain value bound to an object id. The driver owns the
//! running bounces and writes positions back into the registry; it has no
//! clock of its own, so tests can step it frame by frame.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::error::CubeError;
use crate::scene::{ObjectId, SceneRegistry};

/// Shape of a decaying bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParams {
    /// First vertical displacement.
    pub amplitude: f32,
    /// Amplitude multiplier per tick, in `(0, 1)`.
    pub decay: f32,
    /// The bounce finishes once the amplitude drops to this or below.
    pub threshold: f32,
}

impl BounceParams {
    /// A decay outside `(0, 1)` or a non-positive threshold would never
    /// terminate.
    pub fn validate(&self) -> Result<(), CubeError> {
        if !self.amplitude.is_finite() {
            return Err(CubeError::InvalidParameter(format!(
                "bounce amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(CubeError::InvalidParameter(format!(
                "bounce decay must be within (0, 1), got {}",
                self.decay
            )));
        }
        if !(self.threshold > 0.0 && self.threshold.is_finite()) {
            return Err(CubeError::InvalidParameter(format!(
                "bounce threshold must be positive, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Number of displacing ticks before the bounce settles. Matches
    /// `ceil(log(threshold / amplitude) / log(decay))`, zero when the
    /// amplitude starts at or below the threshold. `None` for params that
    /// never settle.
    pub fn displacement_ticks(&self) -> Option<u32> {
        self.validate().ok()?;
        let mut amplitude = self.amplitude;
        let mut ticks = 0;
        while amplitude > self.threshold {
            amplitude *= self.decay;
            ticks += 1;
        }
        Some(ticks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Finished,
}

/// One running bounce.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientAnimation {
    target: ObjectId,
    baseline: Vec3,
    amplitude: f32,
    params: BounceParams,
    ticks: u32,
    complete: bool,
}

impl TransientAnimation {
    pub fn bounce(target: ObjectId, baseline: Vec3, params: BounceParams) -> Self {
        Self {
            target,
            baseline,
            amplitude: params.amplitude,
            params,
            ticks: 0,
            complete: false,
        }
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// Position the object had before the bounce started.
    pub fn baseline(&self) -> Vec3 {
        self.baseline
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance one frame and return where the object should be.
    ///
    /// Displacement is taken from the baseline every tick rather than
    /// accumulated, and the settling tick returns the baseline itself.
    pub fn advance(&mut self) -> (Vec3, TickOutcome) {
        if self.complete {
            return (self.baseline, TickOutcome::Finished);
        }
        self.ticks += 1;
        if self.amplitude <= self.params.threshold {
            self.complete = true;
            return (self.baseline, TickOutcome::Finished);
        }
        let position = self.baseline + Vec3::Y * self.amplitude;
        self.amplitude *= self.params.decay;
        (position, TickOutcome::Running)
    }
}

/// Runs at most one bounce per object.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    active: BTreeMap<ObjectId, TransientAnimation>,
    /// Registry generation the running bounces belong to.
    generation: u64,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a bounce on `id`, cancelling one already running there.
    pub fn start(
        &mut self,
        id: ObjectId,
        params: BounceParams,
        registry: &mut SceneRegistry,
    ) -> Result<(), CubeError> {
        params.validate()?;
        self.sync_generation(registry);
        self.cancel(id, registry);
        let baseline = registry.get(id)?.transform.position;
        let _ = self
            .active
            .insert(id, TransientAnimation::bounce(id, baseline, params));
        log::debug!("bounce started on {id}");
        Ok(())
    }

    /// Stop the bounce on `id` and put the object back on its baseline.
    /// Does nothing when no bounce is running there.
    pub fn cancel(&mut self, id: ObjectId, registry: &mut SceneRegistry) {
        self.sync_generation(registry);
        let Some(anim) = self.active.remove(&id) else {
            return;
        };
        if let Ok(obj) = registry.get_mut(id) {
            obj.transform.position = anim.baseline;
        }
        log::debug!("bounce on {id} cancelled after {} ticks", anim.ticks);
    }

    /// Drop every bounce without touching any object. Used when the objects
    /// they were bound to no longer exist.
    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    /// Advance every bounce by one frame. Returns the ids that settled.
    pub fn tick(&mut self, registry: &mut SceneRegistry) -> Vec<ObjectId> {
        self.sync_generation(registry);
        let mut finished = Vec::new();

        for (id, anim) in &mut self.active {
            let (position, outcome) = anim.advance();
            match registry.get_mut(*id) {
                Ok(obj) => obj.transform.position = position,
                Err(_) => {
                    finished.push(*id);
                    continue;
                }
            }
            if outcome == TickOutcome::Finished {
                finished.push(*id);
            }
        }

        for id in &finished {
            let _ = self.active.remove(id);
            log::debug!("bounce on {id} settled");
        }
        finished
    }

    pub fn is_active(&self, id: ObjectId) -> bool {
        self.active.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&TransientAnimation> {
        self.active.get(&id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Bounces from an older registry generation point at objects that are
    /// gone; ids may already be reused by new objects.
    fn sync_generation(&mut self, registry: &SceneRegistry) {
        if self.generation != registry.generation() {
            if !self.active.is_empty() {
                log::debug!(
                    "dropping {} bounces from generation {}",
                    self.active.len(),
                    self.generation
                );
            }
            self.active.clear();
            self.generation = registry.generation();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::{Dimensions, PickableObject};

    const DEFAULT_BOUNCE: BounceParams = BounceParams {
        amplitude: 0.5,
        decay: 0.7,
        threshold: 0.01,
    };

    fn registry_with(positions: &[Vec3]) -> SceneRegistry {
        let objects = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                PickableObject::new(
                    ObjectId(i as u32 + 1),
                    p,
                    Dimensions::cube(1.0),
                    Color::from_rgb_hex(0x28B463),
                )
            })
            .collect();
        let mut registry = SceneRegistry::new();
        registry.replace(objects).unwrap();
        registry
    }

    fn run_to_completion(
        driver: &mut AnimationDriver,
        registry: &mut SceneRegistry,
        id: ObjectId,
    ) -> u32 {
        let mut ticks = 0;
        while driver.is_active(id) {
            let _ = driver.tick(registry);
            ticks += 1;
            assert!(ticks < 1000, "bounce never settled");
        }
        ticks
    }

    #[test]
    fn default_bounce_settles_on_twelfth_tick() {
        let baseline = Vec3::new(1.25, 3.7, -2.1);
        let mut registry = registry_with(&[baseline]);
        let mut driver = AnimationDriver::new();
        driver.start(ObjectId(1), DEFAULT_BOUNCE, &mut registry).unwrap();

        let ticks = run_to_completion(&mut driver, &mut registry, ObjectId(1));

        assert_eq!(DEFAULT_BOUNCE.displacement_ticks(), Some(11));
        assert_eq!(ticks, 12);
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, baseline);
    }

    #[test]
    fn convergence_matches_closed_form() {
        let cases = [
            BounceParams { amplitude: 1.0, decay: 0.5, threshold: 0.1 },
            BounceParams { amplitude: 2.0, decay: 0.9, threshold: 0.05 },
            BounceParams { amplitude: 0.3, decay: 0.25, threshold: 0.02 },
            BounceParams { amplitude: 0.001, decay: 0.7, threshold: 0.01 },
        ];
        for params in cases {
            let baseline = Vec3::new(0.1, 0.2, 0.3);
            let mut registry = registry_with(&[baseline]);
            let mut driver = AnimationDriver::new();
            driver.start(ObjectId(1), params, &mut registry).unwrap();
            let ticks = run_to_completion(&mut driver, &mut registry, ObjectId(1));
            let closed_form = ((params.threshold as f64 / params.amplitude as f64).ln()
                / (params.decay as f64).ln())
            .ceil()
            .max(0.0) as u32;
            assert_eq!(params.displacement_ticks(), Some(closed_form), "{params:?}");
            assert_eq!(ticks, closed_form + 1, "{params:?}");
            assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, baseline);
        }
    }

    #[test]
    fn amplitude_landing_on_threshold_settles() {
        let params = BounceParams { amplitude: 1.0, decay: 0.5, threshold: 0.125 };
        let mut registry = registry_with(&[Vec3::ZERO]);
        let mut driver = AnimationDriver::new();
        driver.start(ObjectId(1), params, &mut registry).unwrap();

        let ticks = run_to_completion(&mut driver, &mut registry, ObjectId(1));

        // 1.0, 0.5, 0.25 displace; 0.125 settles.
        assert_eq!(params.displacement_ticks(), Some(3));
        assert_eq!(ticks, 4);
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, Vec3::ZERO);
    }

    #[test]
    fn amplitude_equal_to_threshold_never_displaces() {
        let params = BounceParams { amplitude: 0.01, decay: 0.7, threshold: 0.01 };
        let mut anim = TransientAnimation::bounce(ObjectId(1), Vec3::X, params);
        assert_eq!(params.displacement_ticks(), Some(0));
        assert_eq!(anim.advance(), (Vec3::X, TickOutcome::Finished));
        assert!(anim.is_complete());
    }

    #[test]
    fn displacement_decays_from_baseline() {
        let mut anim = TransientAnimation::bounce(ObjectId(1), Vec3::ZERO, DEFAULT_BOUNCE);
        let (first, outcome) = anim.advance();
        assert_eq!(outcome, TickOutcome::Running);
        assert_eq!(first, Vec3::new(0.0, 0.5, 0.0));
        let (second, _) = anim.advance();
        approx::assert_abs_diff_eq!(second.y, 0.35, epsilon = 1e-6);
        assert_eq!(anim.ticks(), 2);
    }

    #[test]
    fn cancel_restores_baseline_immediately() {
        let baseline = Vec3::new(0.0, 1.0, 0.0);
        let mut registry = registry_with(&[baseline]);
        let mut driver = AnimationDriver::new();
        driver.start(ObjectId(1), DEFAULT_BOUNCE, &mut registry).unwrap();
        let _ = driver.tick(&mut registry);
        assert_ne!(registry.get(ObjectId(1)).unwrap().transform.position, baseline);

        driver.cancel(ObjectId(1), &mut registry);
        assert!(!driver.is_active(ObjectId(1)));
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, baseline);

        let _ = driver.tick(&mut registry);
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, baseline);
    }

    #[test]
    fn cancel_without_bounce_is_a_no_op() {
        let mut registry = registry_with(&[Vec3::ONE]);
        let mut driver = AnimationDriver::new();
        driver.cancel(ObjectId(1), &mut registry);
        driver.cancel(ObjectId(42), &mut registry);
        assert!(driver.is_empty());
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, Vec3::ONE);
    }

    #[test]
    fn restart_keeps_original_baseline() {
        let baseline = Vec3::new(2.0, 2.0, 2.0);
        let mut registry = registry_with(&[baseline]);
        let mut driver = AnimationDriver::new();
        driver.start(ObjectId(1), DEFAULT_BOUNCE, &mut registry).unwrap();
        let _ = driver.tick(&mut registry);
        let _ = driver.tick(&mut registry);

        driver.start(ObjectId(1), DEFAULT_BOUNCE, &mut registry).unwrap();
        assert_eq!(driver.len(), 1);
        assert_eq!(driver.get(ObjectId(1)).unwrap().baseline(), baseline);

        let _ = run_to_completion(&mut driver, &mut registry, ObjectId(1));
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, baseline);
    }

    #[test]
    fn independent_objects_bounce_independently() {
        let mut registry = registry_with(&[Vec3::ZERO, Vec3::X]);
        let mut driver = AnimationDriver::new();
        driver.start(ObjectId(1), DEFAULT_BOUNCE, &mut registry).unwrap();
        let _ = driver.tick(&mut registry);
        driver.start(ObjectId(2), DEFAULT_BOUNCE, &mut registry).unwrap();

        let mut finished = Vec::new();
        while !driver.is_empty() {
            finished.extend(driver.tick(&mut registry));
        }
        assert_eq!(finished, vec![ObjectId(1), ObjectId(2)]);
    }

    #[test]
    fn registry_reset_drops_bounces_without_touching_new_objects() {
        let mut registry = registry_with(&[Vec3::ZERO]);
        let mut driver = AnimationDriver::new();
        driver.start(ObjectId(1), DEFAULT_BOUNCE, &mut registry).unwrap();
        let _ = driver.tick(&mut registry);

        // Same id, new generation.
        let fresh = Vec3::new(5.0, 5.0, 5.0);
        registry
            .replace(vec![PickableObject::new(
                ObjectId(1),
                fresh,
                Dimensions::cube(1.0),
                Color::WHITE,
            )])
            .unwrap();

        assert!(driver.tick(&mut registry).is_empty());
        assert!(driver.is_empty());
        assert_eq!(registry.get(ObjectId(1)).unwrap().transform.position, fresh);
    }

    #[test]
    fn start_on_unknown_id_is_not_found() {
        let mut registry = registry_with(&[Vec3::ZERO]);
        let mut driver = AnimationDriver::new();
        assert!(matches!(
            driver.start(ObjectId(9), DEFAULT_BOUNCE, &mut registry),
            Err(CubeError::NotFound(ObjectId(9)))
        ));
        assert!(driver.is_empty());
    }

    #[test]
    fn non_terminating_params_are_rejected() {
        let mut registry = registry_with(&[Vec3::ZERO]);
        let mut driver = AnimationDriver::new();
        for params in [
            BounceParams { decay: 1.0, ..DEFAULT_BOUNCE },
            BounceParams { decay: 0.0, ..DEFAULT_BOUNCE },
            BounceParams { threshold: 0.0, ..DEFAULT_BOUNCE },
            BounceParams { amplitude: f32::NAN, ..DEFAULT_BOUNCE },
        ] {
            assert!(driver.start(ObjectId(1), params, &mut registry).is_err());
            assert_eq!(params.displacement_ticks(), None);
        }
    }
}
