//! The composite tetrahedron object and its activation state machine.
//!
//! # Lifecycle
//!
//! ```text
//! Idle/inactive --activate()--> Activating --duration--> Idle/active
//!       ^                                                     |
//!       +------duration------ Deactivating <--deactivate()----+
//! ```
//!
//! `activate()` and `deactivate()` only ever start a transition from the
//! matching idle state. Any other call returns `false` and changes nothing,
//! including a request in the opposite direction while a transition runs.
//! `is_active()` latches only when a transition completes.
//!
//! Every tick the object also moves its orbs one step and spins both halves
//! by the current rotation speed, whatever state it is in.

use std::f32::consts::{FRAC_PI_4, PI};

use glam::{EulerRot, Quat, Vec3};

use crate::config::Config;
use crate::instances::{PartInstance, PartKind};
use crate::orb::Orb;
use crate::picking::PickVolume;
use crate::registry::ObjectId;
use crate::spawn::Scatter;
use crate::time::Millis;
use crate::transition::{Pose, Progress, TransitionState};

/// Coarse state, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    Activating,
    Active,
    Deactivating,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Inactive => "inactive",
            Phase::Activating => "activating",
            Phase::Active => "active",
            Phase::Deactivating => "deactivating",
        }
    }
}

/// Which half of the tetrahedron pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfKind {
    Top,
    Bottom,
}

/// One of the two spinning halves.
#[derive(Debug, Clone)]
pub struct Half {
    kind: HalfKind,
    position: Vec3,
    spin: f32,
}

impl Half {
    fn new(kind: HalfKind, center: Vec3, separation: f32) -> Self {
        let mut half = Self {
            kind,
            position: center,
            spin: 0.0,
        };
        half.place(center, separation);
        half
    }

    fn place(&mut self, center: Vec3, separation: f32) {
        self.position = match self.kind {
            HalfKind::Top => center + Vec3::Y * separation,
            HalfKind::Bottom => center - Vec3::Y * separation,
        };
    }

    #[inline]
    pub fn kind(&self) -> HalfKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated rotation about the vertical axis, in radians.
    #[inline]
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Orientation of the half in its object's frame.
    ///
    /// The top half is flipped upside down and spun about its own axis. The
    /// bottom half has a fixed skew baked in before the spin.
    pub fn orientation(&self) -> Quat {
        match self.kind {
            HalfKind::Top => Quat::from_rotation_x(PI) * Quat::from_rotation_y(self.spin),
            HalfKind::Bottom => {
                Quat::from_rotation_y(self.spin)
                    * Quat::from_euler(EulerRot::XYZ, PI / 3.3, FRAC_PI_4, 0.0)
            }
        }
    }
}

/// Two halves, an orb swarm and the activation state machine.
#[derive(Debug, Clone)]
pub struct CompositeObject {
    id: ObjectId,
    center: Vec3,
    tilt: f32,
    duration: Millis,
    inactive_pose: Pose,
    active_pose: Pose,
    pose: Pose,
    state: TransitionState,
    is_active: bool,
    top: Half,
    bottom: Half,
    orbs: Vec<Orb>,
    pick_volume: PickVolume,
}

impl CompositeObject {
    /// Build an object at rest: inactive, idle, halves at the inactive
    /// separation, orbs hidden with scale 0.
    pub fn new(id: ObjectId, center: Vec3, tilt: f32, config: &Config, scatter: &mut Scatter) -> Self {
        let transition = &config.transition;
        let inactive_pose = Pose::inactive(transition);
        let active_pose = Pose::active(transition);

        let orbs = scatter
            .orb_layout(center, &config.orbs)
            .into_iter()
            .map(|seed| {
                Orb::new(
                    seed,
                    center,
                    config.orbs.angular_speed,
                    config.orbs.vertical,
                    scatter,
                )
            })
            .collect();

        let pick_volume = PickVolume::new(id, center, config.pick_volume.half_extents(), tilt);

        Self {
            id,
            center,
            tilt,
            duration: transition.duration_ms,
            inactive_pose,
            active_pose,
            pose: inactive_pose,
            state: TransitionState::Idle,
            is_active: false,
            top: Half::new(HalfKind::Top, center, inactive_pose.separation),
            bottom: Half::new(HalfKind::Bottom, center, inactive_pose.separation),
            orbs,
            pick_volume,
        }
    }

    /// Start activating. Returns `false` if already active or activating.
    ///
    /// Orbs become visible immediately; their scale grows over the transition.
    pub fn activate(&mut self, now: Millis) -> bool {
        if self.is_active || self.state.is_activating() {
            return false;
        }
        self.state = TransitionState::Activating { started_at: now };
        for orb in &mut self.orbs {
            orb.set_visible(true);
        }
        log::debug!("{} activating at {} ms", self.id, now);
        true
    }

    /// Start deactivating. Returns `false` if inactive or already deactivating.
    ///
    /// Orbs stay visible until the transition completes.
    pub fn deactivate(&mut self, now: Millis) -> bool {
        if !self.is_active || self.state.is_deactivating() {
            return false;
        }
        self.state = TransitionState::Deactivating { started_at: now };
        log::debug!("{} deactivating at {} ms", self.id, now);
        true
    }

    /// Advance one tick.
    pub fn update(&mut self, now: Millis) {
        match self.state {
            TransitionState::Idle => {}
            TransitionState::Activating { started_at } => {
                match Progress::at(started_at, now, self.duration) {
                    Progress::Running { remaining } => {
                        let pose =
                            Pose::sweep(&self.inactive_pose, &self.active_pose, remaining, self.duration);
                        self.apply_pose(pose);
                    }
                    Progress::Complete => {
                        self.apply_pose(self.active_pose);
                        self.state = TransitionState::Idle;
                        self.is_active = true;
                        log::debug!("{} active at {} ms", self.id, now);
                    }
                }
            }
            TransitionState::Deactivating { started_at } => {
                match Progress::at(started_at, now, self.duration) {
                    Progress::Running { remaining } => {
                        let pose =
                            Pose::sweep(&self.active_pose, &self.inactive_pose, remaining, self.duration);
                        self.apply_pose(pose);
                    }
                    Progress::Complete => {
                        self.apply_pose(self.inactive_pose);
                        for orb in &mut self.orbs {
                            orb.set_visible(false);
                        }
                        self.state = TransitionState::Idle;
                        self.is_active = false;
                        log::debug!("{} inactive at {} ms", self.id, now);
                    }
                }
            }
        }

        for orb in &mut self.orbs {
            orb.update();
        }
        self.top.spin += self.pose.rotation_speed;
        self.bottom.spin += self.pose.rotation_speed;
    }

    fn apply_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.top.place(self.center, pose.separation);
        self.bottom.place(self.center, pose.separation);
        for orb in &mut self.orbs {
            orb.set_scale(pose.orb_scale);
        }
    }

    /// Append render instances for both halves and every orb.
    pub fn instances(&self, out: &mut Vec<PartInstance>) {
        let pivot = Quat::from_rotation_z(self.tilt);
        for half in [&self.top, &self.bottom] {
            let kind = match half.kind() {
                HalfKind::Top => PartKind::Top,
                HalfKind::Bottom => PartKind::Bottom,
            };
            out.push(PartInstance::new(
                kind,
                pivot,
                half.position(),
                half.orientation(),
                1.0,
                true,
            ));
        }
        for orb in &self.orbs {
            out.push(PartInstance::new(
                PartKind::Orb,
                pivot,
                orb.position(),
                Quat::IDENTITY,
                orb.size() * orb.scale(),
                orb.is_visible(),
            ));
        }
    }

    // ========== Queries ==========

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Tilt angle given at construction, unchanged.
    #[inline]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    /// True only between a completed activation and a completed deactivation.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[inline]
    pub fn is_activating(&self) -> bool {
        self.state.is_activating()
    }

    #[inline]
    pub fn is_deactivating(&self) -> bool {
        self.state.is_deactivating()
    }

    #[inline]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        match (self.state, self.is_active) {
            (TransitionState::Activating { .. }, _) => Phase::Activating,
            (TransitionState::Deactivating { .. }, _) => Phase::Deactivating,
            (TransitionState::Idle, true) => Phase::Active,
            (TransitionState::Idle, false) => Phase::Inactive,
        }
    }

    #[inline]
    pub fn transition_duration(&self) -> Millis {
        self.duration
    }

    /// Current distance of each half from the center.
    #[inline]
    pub fn separation(&self) -> f32 {
        self.pose.separation
    }

    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.pose.rotation_speed
    }

    #[inline]
    pub fn orb_scale(&self) -> f32 {
        self.pose.orb_scale
    }

    #[inline]
    pub fn top(&self) -> &Half {
        &self.top
    }

    #[inline]
    pub fn bottom(&self) -> &Half {
        &self.bottom
    }

    #[inline]
    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    #[inline]
    pub fn pick_volume(&self) -> &PickVolume {
        &self.pick_volume
    }
}
