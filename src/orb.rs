//! Orbiting particles.
//!
//! An [`Orb`] circles its owner's center in the horizontal plane at a fixed
//! radius and a fixed angular speed. Visibility and scale belong to the owning
//! object's transition; the orb only moves.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::spawn::{OrbSeed, Scatter};

/// What happens to an orb's starting height once it begins to orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalOffset {
    /// Orbit in the plane through the center. The full starting distance
    /// becomes the circle radius.
    #[default]
    Flatten,
    /// Keep the starting height. The circle radius shrinks so the distance to
    /// the center is unchanged.
    Preserve,
}

/// Sense of rotation, fixed for an orb's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }
}

/// A small body revolving around a fixed center.
#[derive(Debug, Clone)]
pub struct Orb {
    center: Vec3,
    orbit_radius: f32,
    /// Radius of the horizontal circle actually traced.
    planar_radius: f32,
    /// Height above the center kept while orbiting.
    height: f32,
    angle: f32,
    angular_speed: f32,
    direction: Direction,
    position: Vec3,
    size: f32,
    visible: bool,
    scale: f32,
}

impl Orb {
    /// Create an orb at `seed.position` circling `center`.
    ///
    /// Starting angle and direction are drawn from `scatter`. The orb starts
    /// hidden with scale 0.
    pub fn new(
        seed: OrbSeed,
        center: Vec3,
        angular_speed: f32,
        vertical: VerticalOffset,
        scatter: &mut Scatter,
    ) -> Self {
        let orbit_radius = seed.position.distance(center);
        let (planar_radius, height) = match vertical {
            VerticalOffset::Flatten => (orbit_radius, 0.0),
            VerticalOffset::Preserve => {
                let dy = seed.position.y - center.y;
                ((orbit_radius * orbit_radius - dy * dy).max(0.0).sqrt(), dy)
            }
        };

        let angle = scatter.angle();
        let direction = if scatter.coin() {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };

        Self {
            center,
            orbit_radius,
            planar_radius,
            height,
            angle,
            angular_speed,
            direction,
            position: seed.position,
            size: seed.size,
            visible: false,
            scale: 0.0,
        }
    }

    /// Advance one tick around the orbit.
    pub fn update(&mut self) {
        self.angle += self.direction.sign() * self.angular_speed;
        self.position = self.center
            + Vec3::new(
                self.planar_radius * self.angle.cos(),
                self.height,
                self.planar_radius * self.angle.sin(),
            );
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Body radius of the rendered sphere.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orb_at(position: Vec3, center: Vec3, vertical: VerticalOffset, seed: u64) -> Orb {
        let mut scatter = Scatter::seeded(seed);
        Orb::new(
            OrbSeed {
                position,
                size: 0.02,
            },
            center,
            0.005,
            vertical,
            &mut scatter,
        )
    }

    #[test]
    fn test_radius_from_start_position() {
        let orb = orb_at(
            Vec3::new(3.0, 0.0, 4.0),
            Vec3::ZERO,
            VerticalOffset::Flatten,
            1,
        );
        assert_eq!(orb.orbit_radius(), 5.0);
        assert!(!orb.is_visible());
        assert_eq!(orb.scale(), 0.0);
    }

    #[test]
    fn test_angle_steps_by_direction() {
        let mut orb = orb_at(Vec3::X, Vec3::ZERO, VerticalOffset::Flatten, 2);
        let start = orb.angle();
        orb.update();
        let step = orb.angle() - start;
        assert!((step - orb.direction().sign() * 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_both_directions_occur() {
        let mut scatter = Scatter::seeded(5);
        let seed = OrbSeed {
            position: Vec3::X,
            size: 0.02,
        };
        let dirs: Vec<Direction> = (0..64)
            .map(|_| Orb::new(seed, Vec3::ZERO, 0.005, VerticalOffset::Flatten, &mut scatter).direction())
            .collect();
        assert!(dirs.contains(&Direction::Clockwise));
        assert!(dirs.contains(&Direction::CounterClockwise));
    }

    #[test]
    fn test_flatten_drops_height() {
        let center = Vec3::new(0.0, 1.0, -3.0);
        let mut orb = orb_at(
            center + Vec3::new(0.6, 0.08, -0.3),
            center,
            VerticalOffset::Flatten,
            3,
        );
        orb.update();
        assert_eq!(orb.position().y, center.y);
    }

    #[test]
    fn test_preserve_keeps_height() {
        let center = Vec3::new(0.0, 1.0, -3.0);
        let mut orb = orb_at(
            center + Vec3::new(0.6, 0.08, -0.3),
            center,
            VerticalOffset::Preserve,
            3,
        );
        for _ in 0..10 {
            orb.update();
            assert!((orb.position().y - (center.y + 0.08)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_distance_to_center_is_constant() {
        let center = Vec3::new(12.0, -4.0, -13.0);
        for vertical in [VerticalOffset::Flatten, VerticalOffset::Preserve] {
            let mut orb = orb_at(center + Vec3::new(-0.9, -0.07, 1.1), center, vertical, 11);
            let radius = orb.orbit_radius();
            for _ in 0..2000 {
                orb.update();
                let d = orb.position().distance(center);
                assert!((d - radius).abs() < 1e-4, "{vertical:?}: {d} != {radius}");
            }
        }
    }

    #[test]
    fn test_core_orb_stays_at_center() {
        let center = Vec3::new(0.0, 0.0, -3.0);
        let mut orb = orb_at(center, center, VerticalOffset::Flatten, 4);
        assert_eq!(orb.orbit_radius(), 0.0);
        orb.update();
        assert_eq!(orb.position(), center);
    }
}
