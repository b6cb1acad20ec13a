//! Ownership of every composite object in a session.
//!
//! The registry is the single list the frame driver updates and the pointer
//! controller picks against. It also keeps the pick volumes in registration
//! order so a pick query can run over a plain slice.

use std::fmt;

use glam::Vec3;

use crate::composite::CompositeObject;
use crate::config::Config;
use crate::picking::PickVolume;
use crate::spawn::Scatter;
use crate::time::Millis;

/// Handle to an object in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    objects: Vec<CompositeObject>,
    volumes: Vec<PickVolume>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every object listed in `config.objects`.
    pub fn from_config(config: &Config, scatter: &mut Scatter) -> Self {
        let mut registry = Self::new();
        for placement in &config.objects {
            registry.spawn(Vec3::from_array(placement.center), placement.tilt, config, scatter);
        }
        registry
    }

    /// Create a composite object and register its pick volume.
    pub fn spawn(&mut self, center: Vec3, tilt: f32, config: &Config, scatter: &mut Scatter) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let object = CompositeObject::new(id, center, tilt, config, scatter);
        self.volumes.push(object.pick_volume().clone());
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&CompositeObject> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut CompositeObject> {
        self.objects.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositeObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CompositeObject> {
        self.objects.iter_mut()
    }

    /// Pick volumes in registration order.
    pub fn volumes(&self) -> &[PickVolume] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Advance every object to `now`.
    pub fn update_all(&mut self, now: Millis) {
        for object in &mut self.objects {
            object.update(now);
        }
    }
}
