//! The constrained viewing camera
//!
//! The rendering backend owns the real camera; this core only needs its
//! view and projection matrices, and the aspect ratio that window resizes
//! mutate.

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// A perspective camera with a fixed product-shot pose
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov_y,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov_y, self.near, self.far);
        perspective.into_inner()
    }

    /// Combined view-projection matrix, world space straight to clip space
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a window resize
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 5.0, 6.0),
            Point3::new(0.0, 1.5, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            75.0_f32.to_radians(),
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}
