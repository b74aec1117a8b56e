//! The single owner of registry, selection and animations.
//!
//! Input handlers and the frame loop go through [`Stage`]; nothing else
//! holds mutable access to the scene.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{AnimationDriver, BounceParams};
use crate::camera::Camera;
use crate::error::CubeError;
use crate::options::Options;
use crate::picking;
use crate::rotation;
use crate::scene::{ObjectId, SceneRegistry};
use crate::selection::{Selection, SelectionEvent, SelectionPhase};

/// Result of a pointer click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Picked(ObjectId),
    /// Nothing under the pointer; the selection was cleared.
    NoHit,
}

pub struct Stage {
    registry: SceneRegistry,
    selection: Selection,
    animations: AnimationDriver,
    options: Options,
    rng: StdRng,
}

impl Stage {
    /// Validates `options` and generates the first scene.
    pub fn new(options: Options) -> Result<Self, CubeError> {
        let rng = match options.scene.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(options, rng)
    }

    pub fn with_rng(options: Options, rng: StdRng) -> Result<Self, CubeError> {
        options.validate()?;
        let mut stage = Self {
            registry: SceneRegistry::new(),
            selection: Selection::new(options.highlight),
            animations: AnimationDriver::new(),
            options,
            rng,
        };
        let _ = stage.request_reset()?;
        Ok(stage)
    }

    /// Pick whatever lies under `ndc`. A hit selects the object and starts
    /// its bounce; a miss clears the selection.
    pub fn pointer_click(&mut self, ndc: Vec2, camera: &Camera) -> Result<PointerOutcome, CubeError> {
        match picking::pick(ndc, camera, &self.registry) {
            Some(hit) => {
                self.pick(hit.id)?;
                Ok(PointerOutcome::Picked(hit.id))
            }
            None => {
                self.request_clear();
                Ok(PointerOutcome::NoHit)
            }
        }
    }

    /// Select `id` directly and (re)start its bounce.
    pub fn pick(&mut self, id: ObjectId) -> Result<(), CubeError> {
        self.selection
            .pick(id, &mut self.registry, &mut self.animations)?;
        let params = self.bounce_params();
        self.animations.start(id, params, &mut self.registry)
    }

    pub fn request_clear(&mut self) {
        self.selection
            .clear(&mut self.registry, &mut self.animations);
    }

    /// Replace every cube with a freshly randomized set. Returns the new
    /// generation.
    pub fn request_reset(&mut self) -> Result<u64, CubeError> {
        self.selection.invalidate();
        self.animations.cancel_all();
        let generation = self.registry.reset(
            self.options.scene.cube_count,
            &self.options.scene,
            &mut self.rng,
        )?;
        log::info!(
            "generated {} cubes (generation {generation})",
            self.registry.len()
        );
        Ok(generation)
    }

    /// Advance one frame: bounces first, then the idle spin.
    pub fn tick(&mut self) {
        let _ = self.animations.tick(&mut self.registry);
        let selected = self.selection.current(&self.registry);
        rotation::spin_idle(&mut self.registry, selected, self.options.rotation.step);
    }

    /// Selection notifications raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        self.selection.drain_events()
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn animations(&self) -> &AnimationDriver {
        &self.animations
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selection.current(&self.registry)
    }

    pub fn phase(&self) -> SelectionPhase {
        self.selection.phase(&self.registry)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn bounce_params(&self) -> BounceParams {
        self.options.bounce.params()
    }
}
