//! Pointer hit-testing against invisible pick volumes.
//!
//! Each composite object owns one box-shaped [`PickVolume`]. A [`PickQuery`]
//! takes a world-space ray and returns the nearest volume it crosses, which is
//! the only hit the pointer controller ever looks at.

use glam::{Quat, Vec3};

use crate::camera::Ray;
use crate::registry::ObjectId;

/// Axis-aligned box in its object's tilted frame.
///
/// The tilt is a rotation about the world Z axis through the origin, the
/// same pivot the object's halves and orbs hang from.
#[derive(Debug, Clone, PartialEq)]
pub struct PickVolume {
    id: ObjectId,
    center: Vec3,
    half_extents: Vec3,
    tilt: f32,
}

impl PickVolume {
    pub fn new(id: ObjectId, center: Vec3, half_extents: Vec3, tilt: f32) -> Self {
        Self {
            id,
            center,
            half_extents,
            tilt,
        }
    }

    /// Object this volume stands in for.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Distance along `ray` to the first point inside the box.
    ///
    /// Zero when the ray starts inside. `None` when the ray misses or the box
    /// is entirely behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let to_local = Quat::from_rotation_z(-self.tilt);
        let origin = to_local * ray.origin;
        let direction = to_local * ray.direction;

        let min = self.center - self.half_extents;
        let max = self.center + self.half_extents;

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < f32::EPSILON {
                // Parallel to this slab pair
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let t0 = (min[axis] - o) / d;
            let t1 = (max[axis] - o) / d;
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
            if t_near > t_far {
                return None;
            }
        }

        if t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Nearest volume crossed by a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: ObjectId,
    pub distance: f32,
}

/// Nearest-hit query over a set of pick volumes.
pub trait PickQuery {
    fn pick(&self, ray: &Ray, volumes: &[PickVolume]) -> Option<PickHit>;
}

/// CPU ray/box picker.
///
/// Ties go to the volume registered first.
#[derive(Debug, Default, Clone, Copy)]
pub struct RaycastPicker;

impl PickQuery for RaycastPicker {
    fn pick(&self, ray: &Ray, volumes: &[PickVolume]) -> Option<PickHit> {
        volumes
            .iter()
            .filter_map(|volume| {
                volume.intersect(ray).map(|distance| PickHit {
                    id: volume.id(),
                    distance,
                })
            })
            .fold(None, |nearest: Option<PickHit>, hit| match nearest {
                Some(best) if best.distance <= hit.distance => Some(best),
                _ => Some(hit),
            })
    }
}
