//! Perspective camera, viewport and pick rays.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

/// Half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Rectangle the scene is displayed in, in client (window) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport covering a whole window.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn with_origin(mut self, left: f32, top: f32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Convert a client-pixel pointer position to normalized device coordinates.
    ///
    /// Origin is at the center of the viewport, X increases to the right and
    /// Y increases upward. Returns `None` for a zero-sized viewport.
    pub fn to_ndc(&self, pointer: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            ((pointer.x - self.left) / self.width) * 2.0 - 1.0,
            -((pointer.y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }

    /// Width over height, 1.0 when degenerate.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Fixed perspective camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            fov_y: config.fov_y_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        } else {
            log::warn!("ignoring aspect ratio {aspect}, keeping {}", self.aspect);
        }
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), Viewport::default().aspect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let viewport = Viewport::new(800.0, 600.0);

        let center = viewport.to_ndc(Vec2::new(400.0, 300.0)).unwrap();
        assert!(center.x.abs() < 1e-6 && center.y.abs() < 1e-6);

        let top_left = viewport.to_ndc(Vec2::ZERO).unwrap();
        assert_eq!(top_left, Vec2::new(-1.0, 1.0));

        let bottom_right = viewport.to_ndc(Vec2::new(800.0, 600.0)).unwrap();
        assert_eq!(bottom_right, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_ndc_respects_origin() {
        let viewport = Viewport::new(200.0, 100.0).with_origin(50.0, 20.0);
        let ndc = viewport.to_ndc(Vec2::new(150.0, 70.0)).unwrap();
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_viewport() {
        let viewport = Viewport::new(0.0, 600.0);
        assert_eq!(viewport.to_ndc(Vec2::new(10.0, 10.0)), None);
        assert_eq!(viewport.aspect(), 1.0);
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO);

        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_ray_passes_through_projected_point() {
        let camera = Camera::default();
        let point = Vec3::new(-12.0, -2.0, -10.0);

        let clip = camera.view_projection().project_point3(point);
        let ray = camera.ray_from_ndc(Vec2::new(clip.x, clip.y));

        let t = (point - ray.origin).dot(ray.direction);
        assert!(ray.at(t).distance(point) < 1e-3);
    }

    #[test]
    fn test_set_aspect_ignores_garbage() {
        let mut camera = Camera::default();
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(0.0);
        camera.set_aspect(f32::INFINITY);
        assert_eq!(camera.aspect, 2.0);
    }
}
