//! Random placement of orbs around a composite object.
//!
//! All randomness in the crate flows through [`Scatter`], so a session built
//! with a seed lays out the same swarm every run.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::config::OrbConfig;

/// One orb to be created: where it starts and how big its body is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbSeed {
    pub position: Vec3,
    pub size: f32,
}

/// Random source with helpers for orb layout.
///
/// ```ignore
/// let mut scatter = Scatter::seeded(42);
/// let seeds = scatter.orb_layout(Vec3::new(0.0, 0.0, -3.0), &OrbConfig::default());
/// assert_eq!(seeds.len(), 51);
/// ```
pub struct Scatter {
    rng: SmallRng,
}

impl Scatter {
    /// Deterministic source for tests and reproducible scenes.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the OS, different every run.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    ///
    /// Reversed bounds are swapped before sampling. An empty range yields `min`.
    pub fn between(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min > max { (max, min) } else { (min, max) };
        if lo == hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Fair coin.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    // ========== Layout ==========

    /// Starting positions and sizes for one object's swarm.
    ///
    /// The first entry is the core orb pinned at `center`; the remaining
    /// `scatter_count` are spread over a flat box around it.
    pub fn orb_layout(&mut self, center: Vec3, config: &OrbConfig) -> Vec<OrbSeed> {
        let mut seeds = Vec::with_capacity(config.scatter_count + 1);
        seeds.push(OrbSeed {
            position: center,
            size: config.core_size,
        });

        for _ in 0..config.scatter_count {
            let x = self.between(-config.spread_xz, config.spread_xz);
            let z = self.between(-config.spread_xz, config.spread_xz);
            let y = self.between(-config.spread_y, config.spread_y);
            let size = self.between(config.min_size, config.max_size);

            seeds.push(OrbSeed {
                position: center + Vec3::new(x, y, z),
                size,
            });
        }

        seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_tolerates_swapped_bounds() {
        let mut scatter = Scatter::seeded(1);
        for _ in 0..200 {
            let v = scatter.between(0.03, 0.01);
            assert!((0.01..0.03).contains(&v), "{v} outside range");
        }
    }

    #[test]
    fn test_between_empty_range() {
        let mut scatter = Scatter::seeded(1);
        assert_eq!(scatter.between(0.5, 0.5), 0.5);
    }

    #[test]
    fn test_angle_in_range() {
        let mut scatter = Scatter::seeded(3);
        for _ in 0..200 {
            let a = scatter.angle();
            assert!((0.0..TAU).contains(&a));
        }
    }

    #[test]
    fn test_layout_shape() {
        let center = Vec3::new(0.0, 0.0, -3.0);
        let config = OrbConfig::default();
        let seeds = Scatter::seeded(7).orb_layout(center, &config);

        assert_eq!(seeds.len(), 51);
        assert_eq!(seeds[0].position, center);
        assert_eq!(seeds[0].size, 0.15);

        for seed in &seeds[1..] {
            let offset = seed.position - center;
            assert!(offset.x.abs() <= 1.2 + 1e-5);
            assert!(offset.z.abs() <= 1.2 + 1e-5);
            assert!(offset.y.abs() <= 0.1 + 1e-5);
            assert!((0.01..0.03).contains(&seed.size));
        }
    }

    #[test]
    fn test_layout_is_reproducible() {
        let config = OrbConfig::default();
        let a = Scatter::seeded(99).orb_layout(Vec3::ZERO, &config);
        let b = Scatter::seeded(99).orb_layout(Vec3::ZERO, &config);
        assert_eq!(a, b);
    }
}
