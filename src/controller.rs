//! Pointer-driven activation.
//!
//! On every pointer move the controller casts one ray, takes the nearest pick
//! volume it hits, and then walks the registry:
//!
//! - the hovered object starts activating unless it is active or already on
//!   its way up;
//! - every other object that is active starts deactivating unless it is
//!   already on its way down.
//!
//! Nothing else happens. In particular an object that is still activating when
//! the pointer leaves keeps going; it only turns back once it has latched
//! active and a later pointer move misses it.

use glam::Vec2;

use crate::camera::{Camera, Viewport};
use crate::picking::{PickHit, PickQuery};
use crate::registry::{ObjectId, Registry};
use crate::time::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Activate,
    Deactivate,
}

/// A transition started by a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub id: ObjectId,
    pub kind: TriggerKind,
}

/// What one pointer move did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerOutcome {
    pub hit: Option<PickHit>,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Default)]
pub struct PointerController {
    hovered: Option<ObjectId>,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object under the pointer as of the last move.
    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    /// Handle a pointer move at `pointer` (client pixels).
    ///
    /// A zero-sized viewport runs no query and triggers nothing.
    pub fn on_pointer_move(
        &mut self,
        pointer: Vec2,
        viewport: &Viewport,
        camera: &Camera,
        picker: &dyn PickQuery,
        registry: &mut Registry,
        now: Millis,
    ) -> PointerOutcome {
        let Some(ndc) = viewport.to_ndc(pointer) else {
            log::trace!("pointer move ignored: empty viewport {:?}", viewport);
            return PointerOutcome::default();
        };

        let ray = camera.ray_from_ndc(ndc);
        let hit = picker.pick(&ray, registry.volumes());
        log::trace!("pointer at ndc {:?} hit {:?}", ndc, hit);

        let triggers = self.apply_hit(hit.map(|h| h.id), registry, now);
        PointerOutcome { hit, triggers }
    }

    /// Activate the hovered object and deactivate every other active one.
    pub fn apply_hit(
        &mut self,
        hovered: Option<ObjectId>,
        registry: &mut Registry,
        now: Millis,
    ) -> Vec<Trigger> {
        self.hovered = hovered;

        let mut triggers = Vec::new();
        for object in registry.iter_mut() {
            let id = object.id();
            if hovered == Some(id) {
                if !object.is_active() && !object.is_activating() && object.activate(now) {
                    triggers.push(Trigger {
                        id,
                        kind: TriggerKind::Activate,
                    });
                }
            } else if object.is_active() && !object.is_deactivating() && object.deactivate(now) {
                triggers.push(Trigger {
                    id,
                    kind: TriggerKind::Deactivate,
                });
            }
        }
        triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Ray;
    use crate::config::Config;
    use crate::picking::{PickVolume, RaycastPicker};
    use crate::spawn::Scatter;

    fn registry() -> Registry {
        Registry::from_config(&Config::default(), &mut Scatter::seeded(21))
    }

    /// Picker that ignores geometry and always reports the same object.
    struct Always(Option<ObjectId>);

    impl PickQuery for Always {
        fn pick(&self, _ray: &Ray, _volumes: &[PickVolume]) -> Option<PickHit> {
            self.0.map(|id| PickHit { id, distance: 1.0 })
        }
    }

    #[test]
    fn test_hover_activates_only_the_hit() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        let triggers = controller.apply_hit(Some(ObjectId(1)), &mut registry, 100);

        assert_eq!(
            triggers,
            vec![Trigger {
                id: ObjectId(1),
                kind: TriggerKind::Activate
            }]
        );
        assert!(registry.get(ObjectId(1)).unwrap().is_activating());
        assert!(!registry.get(ObjectId(0)).unwrap().is_activating());
        assert_eq!(controller.hovered(), Some(ObjectId(1)));
    }

    #[test]
    fn test_repeated_hover_does_not_retrigger() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        controller.apply_hit(Some(ObjectId(0)), &mut registry, 100);
        let again = controller.apply_hit(Some(ObjectId(0)), &mut registry, 900);

        assert!(again.is_empty());
        assert_eq!(
            registry.get(ObjectId(0)).unwrap().state().started_at(),
            Some(100)
        );
    }

    #[test]
    fn test_leaving_during_activation_does_not_interrupt() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        controller.apply_hit(Some(ObjectId(0)), &mut registry, 0);
        let triggers = controller.apply_hit(None, &mut registry, 500);

        assert!(triggers.is_empty());
        assert!(registry.get(ObjectId(0)).unwrap().is_activating());
    }

    #[test]
    fn test_miss_deactivates_active_object() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        controller.apply_hit(Some(ObjectId(0)), &mut registry, 0);
        registry.update_all(2000);
        assert!(registry.get(ObjectId(0)).unwrap().is_active());

        let triggers = controller.apply_hit(None, &mut registry, 2100);
        assert_eq!(
            triggers,
            vec![Trigger {
                id: ObjectId(0),
                kind: TriggerKind::Deactivate
            }]
        );
        assert!(registry.get(ObjectId(0)).unwrap().is_deactivating());
    }

    #[test]
    fn test_moving_between_objects_swaps_them() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        controller.apply_hit(Some(ObjectId(0)), &mut registry, 0);
        registry.update_all(2000);

        let triggers = controller.apply_hit(Some(ObjectId(2)), &mut registry, 2500);
        assert!(triggers.contains(&Trigger {
            id: ObjectId(0),
            kind: TriggerKind::Deactivate
        }));
        assert!(triggers.contains(&Trigger {
            id: ObjectId(2),
            kind: TriggerKind::Activate
        }));
    }

    #[test]
    fn test_empty_viewport_does_nothing() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        let outcome = controller.on_pointer_move(
            Vec2::new(10.0, 10.0),
            &Viewport::new(0.0, 0.0),
            &Camera::default(),
            &Always(Some(ObjectId(0))),
            &mut registry,
            0,
        );

        assert_eq!(outcome, PointerOutcome::default());
        assert!(!registry.get(ObjectId(0)).unwrap().is_activating());
    }

    #[test]
    fn test_pointer_at_screen_center_hits_front_object() {
        let mut registry = registry();
        let mut controller = PointerController::new();
        let viewport = Viewport::new(800.0, 600.0);

        let outcome = controller.on_pointer_move(
            Vec2::new(400.0, 300.0),
            &viewport,
            &Camera::default(),
            &RaycastPicker,
            &mut registry,
            0,
        );

        assert_eq!(outcome.hit.map(|h| h.id), Some(ObjectId(0)));
        assert_eq!(outcome.triggers.len(), 1);
    }

    #[test]
    fn test_pointer_in_corner_misses() {
        let mut registry = registry();
        let mut controller = PointerController::new();

        let outcome = controller.on_pointer_move(
            Vec2::new(2.0, 2.0),
            &Viewport::new(800.0, 600.0),
            &Camera::default(),
            &RaycastPicker,
            &mut registry,
            0,
        );

        assert_eq!(outcome.hit, None);
        assert!(outcome.triggers.is_empty());
    }
}
