//! Scene configuration.
//!
//! Every constant the animation uses lives here with the reference scene's
//! value as its default. A config file only needs the fields it overrides:
//!
//! ```json
//! {
//!     "transition": { "duration_ms": 1500 },
//!     "orbs": { "scatter_count": 80, "vertical": "preserve" },
//!     "seed": 7
//! }
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::orb::VerticalOffset;
use crate::time::Millis;

/// Timing and interpolation endpoints shared by both transition directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub duration_ms: Millis,
    /// Distance of each half from the center when fully active.
    pub active_separation: f32,
    /// Distance of each half from the center when fully inactive.
    pub inactive_separation: f32,
    /// Spin added to each half per tick when fully active.
    pub active_rotation_speed: f32,
    /// Spin added to each half per tick when fully inactive.
    pub inactive_rotation_speed: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            active_separation: 1.0,
            inactive_separation: 0.75,
            active_rotation_speed: 0.08,
            inactive_rotation_speed: 0.01,
        }
    }
}

/// Orb swarm layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbConfig {
    /// Orbs scattered around the center, in addition to the core orb.
    pub scatter_count: usize,
    /// Half-width of the x/z scatter square.
    pub spread_xz: f32,
    /// Half-height of the y scatter band.
    pub spread_y: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Body radius of the orb pinned at the center.
    pub core_size: f32,
    /// Radians per tick.
    pub angular_speed: f32,
    pub vertical: VerticalOffset,
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            scatter_count: 50,
            spread_xz: 1.2,
            spread_y: 0.1,
            min_size: 0.01,
            max_size: 0.03,
            core_size: 0.15,
            angular_speed: 0.005,
            vertical: VerticalOffset::Flatten,
        }
    }
}

/// Size of the invisible hit-test box around each object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickVolumeConfig {
    /// Full box size (width, height, depth).
    pub size: [f32; 3],
}

impl Default for PickVolumeConfig {
    fn default() -> Self {
        Self {
            size: [3.0, 5.0, 3.0],
        }
    }
}

impl PickVolumeConfig {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::from_array(self.size) * 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov_y_degrees: 65.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Where one composite object sits and how far it is tilted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    pub center: [f32; 3],
    #[serde(default)]
    pub tilt: f32,
}

impl ObjectPlacement {
    pub fn new(center: [f32; 3], tilt: f32) -> Self {
        Self { center, tilt }
    }
}

/// Top-level configuration for a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transition: TransitionConfig,
    pub orbs: OrbConfig,
    pub pick_volume: PickVolumeConfig,
    pub camera: CameraConfig,
    pub objects: Vec<ObjectPlacement>,
    /// Seed for orb placement. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            orbs: OrbConfig::default(),
            pick_volume: PickVolumeConfig::default(),
            camera: CameraConfig::default(),
            objects: vec![
                ObjectPlacement::new([0.0, 0.0, -3.0], 0.0),
                ObjectPlacement::new([-12.0, -2.0, -10.0], -0.2),
                ObjectPlacement::new([12.0, -4.0, -13.0], 0.4),
            ],
            seed: None,
        }
    }
}

impl Config {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transition;
        if t.duration_ms == 0 {
            return Err(ConfigError::invalid(
                "transition.duration_ms",
                "must be greater than zero",
            ));
        }
        ensure_finite(
            "transition",
            &[
                t.active_separation,
                t.inactive_separation,
                t.active_rotation_speed,
                t.inactive_rotation_speed,
            ],
        )?;

        let o = &self.orbs;
        ensure_finite(
            "orbs",
            &[
                o.spread_xz,
                o.spread_y,
                o.min_size,
                o.max_size,
                o.core_size,
                o.angular_speed,
            ],
        )?;

        if self.pick_volume.size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ConfigError::invalid(
                "pick_volume.size",
                format!("every extent must be positive, got {:?}", self.pick_volume.size),
            ));
        }

        let c = &self.camera;
        ensure_finite("camera.position", &c.position)?;
        ensure_finite("camera.target", &c.target)?;
        if !(c.fov_y_degrees > 0.0 && c.fov_y_degrees < 180.0) {
            return Err(ConfigError::invalid(
                "camera.fov_y_degrees",
                format!("must be in (0, 180), got {}", c.fov_y_degrees),
            ));
        }
        if !(c.near > 0.0 && c.far > c.near) {
            return Err(ConfigError::invalid(
                "camera.near",
                format!("need 0 < near < far, got near={} far={}", c.near, c.far),
            ));
        }
        if c.position == c.target {
            return Err(ConfigError::invalid(
                "camera.target",
                "must differ from camera.position",
            ));
        }
        // look_at with +Y up has no defined orientation along the Y axis
        let forward = Vec3::from_array(c.target) - Vec3::from_array(c.position);
        if forward.cross(Vec3::Y).length_squared() == 0.0 {
            return Err(ConfigError::invalid(
                "camera.target",
                format!("view direction {forward} is parallel to the up axis"),
            ));
        }

        if self.objects.is_empty() {
            return Err(ConfigError::invalid("objects", "at least one object is required"));
        }
        for placement in &self.objects {
            ensure_finite("objects.center", &placement.center)?;
            ensure_finite("objects.tilt", &[placement.tilt])?;
        }

        Ok(())
    }
}

fn ensure_finite(field: &'static str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("non-finite value in {:?}", values)))
    }
}
