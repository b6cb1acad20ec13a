//! # tetra-orbit
//!
//! Animation and interaction core for a scene of split tetrahedrons that wake
//! up when the pointer hovers over them.
//!
//! Each [`CompositeObject`] is a pair of halves plus a swarm of small orbs.
//! Hovering its invisible pick volume starts a timed transition: the halves
//! drift apart, the orbs fade in and the spin speeds up. Moving away runs the
//! same sweep backwards once the object has fully woken.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tetra_orbit::prelude::*;
//!
//! let mut session = Session::new(Config::default(), Time::new())?;
//! session.resize(1200, 800);
//!
//! // Pointer events flip transition state inline...
//! session.pointer_moved(Vec2::new(600.0, 400.0));
//!
//! // ...and every frame advances it.
//! loop {
//!     session.tick();
//!     draw(session.instances());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Transitions
//!
//! An object is always in exactly one of `Idle`, `Activating` or
//! `Deactivating` (see [`TransitionState`]). Sweeps are linear in elapsed time
//! and last `transition.duration_ms` (2000 ms by default):
//!
//! | Value | Inactive | Active |
//! |-------|----------|--------|
//! | half separation | 0.75 | 1.0 |
//! | orb scale | 0 | 1 |
//! | spin per tick | 0.01 | 0.08 |
//!
//! ### Orbs
//!
//! Every object has one core orb at its center and 50 scattered around it.
//! Each orb circles the center at a fixed radius, in a direction chosen at
//! random when it is created. Pass a seed in [`Config`] for a repeatable
//! layout.
//!
//! ### Picking
//!
//! Pointer positions become world rays through the [`Camera`]; a
//! [`PickQuery`] returns the nearest [`PickVolume`] hit. The
//! [`PointerController`] activates that object and deactivates the others.

pub mod camera;
pub mod composite;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod instances;
pub mod orb;
pub mod picking;
pub mod registry;
pub mod session;
pub mod spawn;
pub mod time;
pub mod transition;

pub use bytemuck;
pub use camera::{Camera, Ray, Viewport};
pub use composite::{CompositeObject, Phase};
pub use config::Config;
pub use controller::{PointerController, PointerOutcome, Trigger, TriggerKind};
pub use glam::{Vec2, Vec3};
pub use instances::{PartInstance, PartKind};
pub use orb::{Orb, VerticalOffset};
pub use picking::{PickHit, PickQuery, PickVolume, RaycastPicker};
pub use registry::{ObjectId, Registry};
pub use session::Session;
pub use spawn::Scatter;
pub use transition::TransitionState;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use tetra_orbit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, Viewport};
    pub use crate::composite::{CompositeObject, Phase};
    pub use crate::config::Config;
    pub use crate::controller::{PointerOutcome, TriggerKind};
    pub use crate::input::{InputEvent, PointerInput};
    pub use crate::instances::{PartInstance, PartKind};
    pub use crate::registry::ObjectId;
    pub use crate::session::Session;
    pub use crate::spawn::Scatter;
    pub use crate::time::{Clock, ManualClock, Time};
    pub use crate::{Vec2, Vec3};
}
