//! Viewer configuration

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use turntable_core::{Camera, ScreenProjector, DEFAULT_HIT_TOLERANCE, DEFAULT_STEP_COUNT};

/// Camera placement for the constrained product-shot view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 5.0, 6.0),
            target: Point3::new(0.0, 1.5, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov_y: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Build a camera at this pose for a viewport aspect ratio
    pub fn camera(&self, aspect_ratio: f32) -> Camera {
        Camera::new(
            self.position,
            self.target,
            self.up,
            self.fov_y,
            aspect_ratio,
            self.near,
            self.far,
        )
    }
}

/// Top-level viewer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Discrete rotation steps per full revolution
    pub step_count: u32,
    /// The label floats this many pixels above its anchor
    pub label_offset_px: f32,
    /// NDC depth for the connector-line endpoint unprojection
    pub connector_depth_ndc: f32,
    /// Hit-test tolerance radius in world units
    pub hit_tolerance: f32,
    pub camera: CameraConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            step_count: DEFAULT_STEP_COUNT,
            label_offset_px: 300.0,
            connector_depth_ndc: 0.5,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// The projector this configuration describes
    pub fn projector(&self) -> ScreenProjector {
        ScreenProjector {
            label_offset_px: self.label_offset_px,
            connector_depth_ndc: self.connector_depth_ndc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_the_shipped_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.step_count, 38);
        assert_relative_eq!(config.label_offset_px, 300.0);
        assert_relative_eq!(config.hit_tolerance, 1.0);
        assert_relative_eq!(config.camera.position.y, 5.0);
        assert_relative_eq!(config.camera.target.y, 1.5);
    }

    #[test]
    fn test_camera_inherits_viewport_aspect() {
        let camera = CameraConfig::default().camera(2.0);
        assert_relative_eq!(camera.aspect_ratio, 2.0);
    }
}
