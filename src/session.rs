//! Per-frame driver tying the pieces together.
//!
//! A [`Session`] owns everything with state: the registry of composite
//! objects, the pointer controller, the camera, the viewport, the picker and
//! the clock. The host event loop calls [`Session::tick`] once per frame and
//! forwards pointer moves and resizes as they arrive.
//!
//! ```ignore
//! let mut session = Session::new(Config::default(), Time::new())?;
//!
//! // On every CursorMoved:
//! session.pointer_moved(Vec2::new(x, y));
//!
//! // On every frame:
//! session.tick();
//! renderer.upload(session.instances());
//! ```

use glam::Vec2;

use crate::camera::{Camera, Viewport};
use crate::config::Config;
use crate::controller::{PointerController, PointerOutcome};
use crate::error::ConfigError;
use crate::instances::PartInstance;
use crate::picking::{PickQuery, RaycastPicker};
use crate::registry::{ObjectId, Registry};
use crate::spawn::Scatter;
use crate::time::{Clock, Millis, Time};

pub struct Session<C: Clock = Time> {
    clock: C,
    registry: Registry,
    controller: PointerController,
    camera: Camera,
    viewport: Viewport,
    picker: Box<dyn PickQuery>,
    instances: Vec<PartInstance>,
}

impl<C: Clock> Session<C> {
    /// Validate `config` and build its scene.
    ///
    /// Orb placement is seeded from `config.seed` when set.
    pub fn new(config: Config, clock: C) -> Result<Self, ConfigError> {
        let mut scatter = match config.seed {
            Some(seed) => Scatter::seeded(seed),
            None => Scatter::from_entropy(),
        };
        Self::with_scatter(config, clock, &mut scatter)
    }

    /// Like [`Session::new`], drawing orb placement from `scatter`.
    pub fn with_scatter(config: Config, clock: C, scatter: &mut Scatter) -> Result<Self, ConfigError> {
        config.validate()?;

        let viewport = Viewport::default();
        let camera = Camera::from_config(&config.camera, viewport.aspect());
        let registry = Registry::from_config(&config, scatter);
        log::info!(
            "session ready: {} objects, {} ms transitions",
            registry.len(),
            config.transition.duration_ms
        );

        Ok(Self {
            clock,
            registry,
            controller: PointerController::new(),
            camera,
            viewport,
            picker: Box::new(RaycastPicker),
            instances: Vec::new(),
        })
    }

    /// Replace the default ray/box picker.
    pub fn with_picker(mut self, picker: impl PickQuery + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Advance the clock and update every object. Returns the frame time.
    pub fn tick(&mut self) -> Millis {
        self.clock.advance();
        let now = self.clock.now_ms();
        self.registry.update_all(now);
        now
    }

    /// Forward a pointer move in client pixels.
    ///
    /// State changes take effect on the next [`tick`](Session::tick).
    pub fn pointer_moved(&mut self, pointer: Vec2) -> PointerOutcome {
        let now = self.clock.now_ms();
        self.controller.on_pointer_move(
            pointer,
            &self.viewport,
            &self.camera,
            self.picker.as_ref(),
            &mut self.registry,
            now,
        )
    }

    /// Track a window resize: the viewport fills the window and the camera
    /// aspect follows it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.set_viewport(Viewport::new(width as f32, height as f32));
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    /// Render snapshot for the current frame.
    pub fn instances(&mut self) -> &[PartInstance] {
        self.instances.clear();
        for object in self.registry.iter() {
            object.instances(&mut self.instances);
        }
        &self.instances
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.controller.hovered()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn session() -> Session<ManualClock> {
        let config = Config {
            seed: Some(5),
            ..Config::default()
        };
        Session::new(config, ManualClock::new()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = Config {
            objects: Vec::new(),
            ..Config::default()
        };
        assert!(Session::new(config, ManualClock::new()).is_err());
    }

    #[test]
    fn test_tick_reads_clock() {
        let mut session = session();
        session.clock_mut().set(1234);
        assert_eq!(session.tick(), 1234);
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut session = session();
        session.resize(1600, 400);
        assert_eq!(session.viewport().width, 1600.0);
        assert_eq!(session.camera().aspect, 4.0);
    }

    #[test]
    fn test_instances_cover_scene() {
        let mut session = session();
        assert_eq!(session.instances().len(), 3 * (2 + 51));
    }

    #[test]
    fn test_seeded_sessions_match() {
        let mut a = session();
        let mut b = session();
        a.tick();
        b.tick();
        assert_eq!(a.instances(), b.instances());
    }
}
