//! Fixed perspective camera looking at the origin.

use glam::{Mat4, Vec3};

use crate::config::ViewConfig;

/// Perspective camera plus the viewport it projects into.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    aspect: f32,
    viewport: (u32, u32),
}

impl Camera {
    /// Create a camera for a viewport of `width` x `height` pixels.
    pub fn new(view: &ViewConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            fov_y: view.fov_degrees.to_radians(),
            near: view.near,
            far: view.far,
            eye: view.eye,
            target: Vec3::ZERO,
            aspect: 1.0,
            viewport: (1, 1),
        };
        camera.resize(width, height);
        camera
    }

    /// Match the projection to a new viewport size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.viewport = (width, height);
        self.aspect = width as f32 / height as f32;
        true
    }

    /// Width over height.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Viewport size in pixels.
    #[inline]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Calculate the projection matrix for the current aspect.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_sets_exact_aspect() {
        let mut camera = Camera::new(&ViewConfig::default(), 1280, 720);
        assert_eq!(camera.viewport(), (1280, 720));
        assert_eq!(camera.aspect(), 1280.0 / 720.0);

        assert!(camera.resize(1000, 250));
        assert_eq!(camera.viewport(), (1000, 250));
        assert_eq!(camera.aspect(), 4.0);
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut camera = Camera::new(&ViewConfig::default(), 800, 600);
        assert!(!camera.resize(0, 600));
        assert_eq!(camera.viewport(), (800, 600));
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(&ViewConfig::default(), 800, 600);
        let clip = camera.projection_matrix() * camera.view_matrix() * glam::Vec4::W;
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
