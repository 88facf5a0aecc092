//! Pointer ray casting against registered anchors

use crate::camera::Camera;
use crate::error::Result;
use crate::projection::{ndc_to_world, screen_to_ndc, Viewport};
use nalgebra::{Point3, Vector3};

/// Default hit tolerance in world units
///
/// Clicks select the nearest anchor within this radius of the pointer ray.
pub const DEFAULT_HIT_TOLERANCE: f32 = 1.0;

/// A half-line from the camera into the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Cast a ray from the camera through a viewport pixel
    pub fn through_screen(
        camera: &Camera,
        viewport: &Viewport,
        screen_x: f32,
        screen_y: f32,
    ) -> Result<Self> {
        let ndc = screen_to_ndc(screen_x, screen_y, viewport, 0.5);
        let through = ndc_to_world(camera, &ndc)?;
        let direction = (through - camera.position).normalize();
        Ok(Self {
            origin: camera.position,
            direction,
        })
    }

    /// Minimum distance from a point to this ray
    ///
    /// Half-line semantics: points behind the origin measure their distance
    /// to the origin itself.
    pub fn distance_to_point(&self, point: &Point3<f32>) -> f32 {
        let to_point = point - self.origin;
        let along = to_point.dot(&self.direction);
        if along < 0.0 {
            return to_point.norm();
        }
        (point - (self.origin + self.direction * along)).norm()
    }
}

/// The nearest anchor whose distance to the ray is below the tolerance
///
/// Nearest-only: when several anchors qualify, only the one closest to the
/// ray is reported.
pub fn nearest_hit<'a>(
    ray: &Ray,
    candidates: &'a [(String, Point3<f32>)],
    tolerance: f32,
) -> Option<&'a str> {
    let mut best: Option<(&'a str, f32)> = None;
    for (id, position) in candidates {
        let distance = ray.distance_to_point(position);
        if distance >= tolerance {
            continue;
        }
        match best {
            Some((_, nearest)) if nearest <= distance => {}
            _ => best = Some((id.as_str(), distance)),
        }
    }
    best.map(|(id, _)| id)
}
