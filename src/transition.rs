//! Timed transitions between the inactive and active poses.
//!
//! A transition is a linear sweep over a fixed duration. Progress is expressed
//! as a countdown: `remaining` starts at the duration and runs to zero, and
//! every animated value is mapped from `[duration, 0]` onto its start/end pair.

use crate::config::TransitionConfig;
use crate::time::Millis;

/// Where an object is in its activation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Activating { started_at: Millis },
    Deactivating { started_at: Millis },
}

impl TransitionState {
    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, TransitionState::Idle)
    }

    #[inline]
    pub fn is_activating(self) -> bool {
        matches!(self, TransitionState::Activating { .. })
    }

    #[inline]
    pub fn is_deactivating(self) -> bool {
        matches!(self, TransitionState::Deactivating { .. })
    }

    pub fn started_at(self) -> Option<Millis> {
        match self {
            TransitionState::Idle => None,
            TransitionState::Activating { started_at }
            | TransitionState::Deactivating { started_at } => Some(started_at),
        }
    }
}

/// Re-map `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Not clamped: values outside the input range extrapolate.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// How far a running transition has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running { remaining: Millis },
    Complete,
}

impl Progress {
    /// Progress of a transition that began at `started_at`.
    ///
    /// Reaching or overshooting the duration counts as complete.
    pub fn at(started_at: Millis, now: Millis, duration: Millis) -> Self {
        let elapsed = now.saturating_sub(started_at);
        if elapsed >= duration {
            Progress::Complete
        } else {
            Progress::Running {
                remaining: duration - elapsed,
            }
        }
    }
}

/// The animated values of a composite object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Distance of each half from the center.
    pub separation: f32,
    /// Scale applied to every orb.
    pub orb_scale: f32,
    /// Spin added to each half per tick.
    pub rotation_speed: f32,
}

impl Pose {
    pub fn inactive(config: &TransitionConfig) -> Self {
        Self {
            separation: config.inactive_separation,
            orb_scale: 0.0,
            rotation_speed: config.inactive_rotation_speed,
        }
    }

    pub fn active(config: &TransitionConfig) -> Self {
        Self {
            separation: config.active_separation,
            orb_scale: 1.0,
            rotation_speed: config.active_rotation_speed,
        }
    }

    /// Pose part way from `from` to `to` with `remaining` of `duration` left.
    pub fn sweep(from: &Pose, to: &Pose, remaining: Millis, duration: Millis) -> Self {
        let t = remaining as f32;
        let d = duration as f32;
        Self {
            separation: map_range(t, d, 0.0, from.separation, to.separation),
            orb_scale: map_range(t, d, 0.0, from.orb_scale, to.orb_scale),
            rotation_speed: map_range(t, d, 0.0, from.rotation_speed, to.rotation_speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_countdown() {
        // Countdown from 2000 to 0 onto 0.75..1.0
        assert_eq!(map_range(2000.0, 2000.0, 0.0, 0.75, 1.0), 0.75);
        assert_eq!(map_range(0.0, 2000.0, 0.0, 0.75, 1.0), 1.0);
        assert!((map_range(1000.0, 2000.0, 0.0, 0.75, 1.0) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_map_range_is_not_clamped() {
        assert!((map_range(-1000.0, 2000.0, 0.0, 0.0, 1.0) - 1.5).abs() < 1e-6);
        assert!((map_range(3000.0, 2000.0, 0.0, 0.0, 1.0) + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_progress() {
        assert_eq!(
            Progress::at(1000, 1000, 2000),
            Progress::Running { remaining: 2000 }
        );
        assert_eq!(
            Progress::at(1000, 2500, 2000),
            Progress::Running { remaining: 500 }
        );
        assert_eq!(Progress::at(1000, 3000, 2000), Progress::Complete);
        assert_eq!(Progress::at(1000, 9000, 2000), Progress::Complete);
        // A clock reading before the start is treated as no time elapsed
        assert_eq!(
            Progress::at(1000, 900, 2000),
            Progress::Running { remaining: 2000 }
        );
    }

    #[test]
    fn test_sweep_follows_elapsed_fraction() {
        let config = TransitionConfig::default();
        let from = Pose::inactive(&config);
        let to = Pose::active(&config);

        for elapsed in (0..2000).step_by(125) {
            let pose = Pose::sweep(&from, &to, 2000 - elapsed, 2000);
            let expected = 0.75 + (1.0 - 0.75) * elapsed as f32 / 2000.0;
            assert!((pose.separation - expected).abs() < 1e-6);
            assert!((pose.orb_scale - elapsed as f32 / 2000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_state_queries() {
        let idle = TransitionState::default();
        assert!(idle.is_idle());
        assert_eq!(idle.started_at(), None);

        let up = TransitionState::Activating { started_at: 5 };
        assert!(up.is_activating() && !up.is_deactivating());
        assert_eq!(up.started_at(), Some(5));

        let down = TransitionState::Deactivating { started_at: 7 };
        assert!(down.is_deactivating() && !down.is_activating());
    }
}
