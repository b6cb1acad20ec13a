//! Render snapshot of the animated scene.
//!
//! The core never talks to a renderer. Instead, each frame a renderer pulls a
//! flat list of [`PartInstance`] values and uploads it as instance data. The
//! struct is `#[repr(C)]` and `Pod`, so the slice can go straight into a
//! vertex buffer with `bytemuck::cast_slice`.
//!
//! Orb instances assume a unit-radius sphere mesh: the orb's body size and
//! transition scale are folded into the model matrix.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Mesh an instance should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PartKind {
    Top = 0,
    Bottom = 1,
    Orb = 2,
}

/// One renderable part of a composite object.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PartInstance {
    /// Column-major world transform.
    pub model: [[f32; 4]; 4],
    /// [`PartKind`] discriminant.
    pub kind: u32,
    /// 0 = hidden, 1 = drawn.
    pub visible: u32,
    pub _padding: [u32; 2],
}

impl PartInstance {
    /// Instance at `position` with `orientation` and uniform `scale`, hung from
    /// an object pivot rotated by `pivot` about the world origin.
    pub fn new(
        kind: PartKind,
        pivot: Quat,
        position: Vec3,
        orientation: Quat,
        scale: f32,
        visible: bool,
    ) -> Self {
        let local = Mat4::from_scale_rotation_translation(Vec3::splat(scale), orientation, position);
        let model = Mat4::from_quat(pivot) * local;
        Self {
            model: model.to_cols_array_2d(),
            kind: kind as u32,
            visible: visible as u32,
            _padding: [0; 2],
        }
    }

    /// World-space position of the part's origin.
    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model).w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_gpu_friendly() {
        assert_eq!(std::mem::size_of::<PartInstance>(), 80);
        let instances = [PartInstance::zeroed(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 240);
    }

    #[test]
    fn test_untilted_translation() {
        let instance = PartInstance::new(
            PartKind::Orb,
            Quat::IDENTITY,
            Vec3::new(1.0, 2.0, 3.0),
            Quat::IDENTITY,
            0.5,
            true,
        );
        assert_eq!(instance.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(instance.kind, 2);
        assert_eq!(instance.visible, 1);
    }

    #[test]
    fn test_pivot_rotates_about_origin() {
        let instance = PartInstance::new(
            PartKind::Top,
            Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            Vec3::new(10.0, 0.0, 0.0),
            Quat::IDENTITY,
            1.0,
            false,
        );
        assert!((instance.translation() - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);
        assert_eq!(instance.visible, 0);
    }
}
