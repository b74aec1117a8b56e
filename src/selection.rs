//! Single-selection state machine.
//!
//! The selection refers to objects by id plus the registry generation it
//! was made in, never by reference, so a registry reset cannot leave it
//! pointing at a destroyed object.

use glam::Vec3;

use crate::animation::AnimationDriver;
use crate::color::Color;
use crate::error::CubeError;
use crate::options::HighlightOptions;
use crate::scene::{Dimensions, ObjectId, PickableObject, SceneRegistry};

/// What the info panel shows about the selected object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub position: Vec3,
    pub size: Dimensions,
    /// Base color as `#RRGGBB`.
    pub color_hex: String,
}

impl ObjectSnapshot {
    pub fn of(obj: &PickableObject) -> Self {
        Self {
            id: obj.id(),
            position: obj.transform.position,
            size: obj.size(),
            color_hex: obj.base_color().hex(),
        }
    }
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Changed(ObjectSnapshot),
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Empty,
    Selected(ObjectId),
}

/// The selected object and the look it had before being highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Selected {
    id: ObjectId,
    generation: u64,
    restore_color: Color,
    restore_emissive: Color,
}

#[derive(Debug)]
pub struct Selection {
    current: Option<Selected>,
    highlight: HighlightOptions,
    events: Vec<SelectionEvent>,
}

impl Selection {
    pub fn new(highlight: HighlightOptions) -> Self {
        Self {
            current: None,
            highlight,
            events: Vec::new(),
        }
    }

    /// Select `id`, releasing whatever was selected before.
    ///
    /// `id` must exist in the current registry generation; callers obtain
    /// it from the picker or the registry. An unknown id is logged, the
    /// selection is cleared and [`CubeError::PreconditionViolation`] is
    /// returned.
    pub fn pick(
        &mut self,
        id: ObjectId,
        registry: &mut SceneRegistry,
        animations: &mut AnimationDriver,
    ) -> Result<(), CubeError> {
        if !registry.contains(id) {
            log::warn!(
                "pick of {id} which is not in generation {}, clearing selection",
                registry.generation()
            );
            self.clear(registry, animations);
            return Err(CubeError::PreconditionViolation(id));
        }

        let generation = registry.generation();
        let previous = self.current.take();
        let kept = match previous {
            Some(prev) if prev.id == id && prev.generation == generation => Some(prev),
            Some(prev) => {
                self.release(prev, registry, animations);
                None
            }
            None => None,
        };

        animations.cancel(id, registry);
        let obj = registry.get_mut(id)?;
        let selected = kept.unwrap_or(Selected {
            id,
            generation,
            restore_color: obj.color,
            restore_emissive: obj.emissive,
        });

        obj.color = self.highlight.color;
        obj.emissive = self.highlight.emissive;
        obj.transform.scale = Vec3::splat(self.highlight.scale);

        let snapshot = ObjectSnapshot::of(obj);
        log::info!(
            "selected cube {} at ({:.2}, {:.2}, {:.2})",
            id,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.position.z
        );
        self.current = Some(selected);
        self.events.push(SelectionEvent::Changed(snapshot));
        Ok(())
    }

    /// Deselect and restore the object's look. No-op when nothing is
    /// selected.
    pub fn clear(&mut self, registry: &mut SceneRegistry, animations: &mut AnimationDriver) {
        let Some(prev) = self.current.take() else {
            return;
        };
        self.release(prev, registry, animations);
        log::info!("selection cleared");
        self.events.push(SelectionEvent::Cleared);
    }

    /// Forget the selection after its object was destroyed by a registry
    /// reset. Nothing is restored since the object no longer exists.
    pub fn invalidate(&mut self) {
        if let Some(prev) = self.current.take() {
            log::debug!("selection of {} invalidated by reset", prev.id);
            self.events.push(SelectionEvent::Cleared);
        }
    }

    /// The selected id, if it belongs to the registry's current generation.
    pub fn current(&self, registry: &SceneRegistry) -> Option<ObjectId> {
        self.current
            .filter(|sel| sel.generation == registry.generation())
            .map(|sel| sel.id)
    }

    pub fn phase(&self, registry: &SceneRegistry) -> SelectionPhase {
        self.current(registry)
            .map_or(SelectionPhase::Empty, SelectionPhase::Selected)
    }

    /// Color the selected object gets back when deselected.
    pub fn restore_color(&self) -> Option<Color> {
        self.current.map(|sel| sel.restore_color)
    }

    /// Take the notifications raised since the last call.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    fn release(
        &self,
        prev: Selected,
        registry: &mut SceneRegistry,
        animations: &mut AnimationDriver,
    ) {
        if prev.generation != registry.generation() {
            return;
        }
        animations.cancel(prev.id, registry);
        if let Ok(obj) = registry.get_mut(prev.id) {
            obj.color = prev.restore_color;
            obj.emissive = prev.restore_emissive;
            obj.transform.scale = Vec3::ONE;
        }
    }
}
