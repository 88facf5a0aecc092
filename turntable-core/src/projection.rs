//! Screen projection of anchor points
//!
//! World-space anchor positions map through the camera to viewport pixels
//! for the floating labels, and the offset label positions map back into
//! world space for the connector-line endpoints. Both directions are pure
//! functions of the camera and viewport, so repeated calls with unchanged
//! state are drift-free.

use crate::camera::Camera;
use crate::error::{Error, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Per-tick projection output for one anchor
///
/// Fully recomputed from anchor and camera state every tick, never
/// persisted. `screen_x`/`screen_y` is the displayed label position, already
/// offset above the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLabel {
    pub anchor_id: String,
    pub anchor_world: Point3<f32>,
    pub screen_x: f32,
    pub screen_y: f32,
    pub visible: bool,
    pub connector_world_end: Point3<f32>,
}

/// Transform a world point to normalized device coordinates
///
/// Returns `None` for the degenerate case of a point on the camera plane
/// (homogeneous w of zero).
pub fn world_to_ndc(camera: &Camera, world: &Point3<f32>) -> Option<Point3<f32>> {
    let clip = camera.view_projection_matrix() * world.to_homogeneous();
    if clip.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(Point3::new(
        clip.x / clip.w,
        clip.y / clip.w,
        clip.z / clip.w,
    ))
}

/// Map NDC x/y to viewport pixel coordinates
///
/// Screen space grows downward while NDC grows upward, hence the Y flip.
pub fn ndc_to_screen(ndc: &Point3<f32>, viewport: &Viewport) -> (f32, f32) {
    (
        (ndc.x * 0.5 + 0.5) * viewport.width,
        (-ndc.y * 0.5 + 0.5) * viewport.height,
    )
}

/// Map a viewport pixel back to NDC at the given depth
pub fn screen_to_ndc(x: f32, y: f32, viewport: &Viewport, depth: f32) -> Point3<f32> {
    Point3::new(
        (x / viewport.width) * 2.0 - 1.0,
        -((y / viewport.height) * 2.0 - 1.0),
        depth,
    )
}

/// Inverse-project an NDC point back into world space
pub fn ndc_to_world(camera: &Camera, ndc: &Point3<f32>) -> Result<Point3<f32>> {
    let inverse = camera
        .view_projection_matrix()
        .try_inverse()
        .ok_or_else(|| Error::Projection("view-projection matrix is not invertible".to_string()))?;
    let world = inverse * ndc.to_homogeneous();
    if world.w.abs() <= f32::EPSILON {
        return Err(Error::Projection(
            "unprojected point lies at infinity".to_string(),
        ));
    }
    Ok(Point3::new(
        world.x / world.w,
        world.y / world.w,
        world.z / world.w,
    ))
}

/// Projects anchors into screen space and derives connector endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenProjector {
    /// The label floats this many pixels above its anchor
    pub label_offset_px: f32,
    /// NDC depth at which the label position unprojects for the connector
    pub connector_depth_ndc: f32,
}

impl Default for ScreenProjector {
    fn default() -> Self {
        Self {
            label_offset_px: 300.0,
            connector_depth_ndc: 0.5,
        }
    }
}

impl ScreenProjector {
    /// Project one anchor through the camera
    ///
    /// The connector endpoint is the unprojected inverse of the *offset*
    /// label position at mid-depth, so the line reaches from the 3D point up
    /// to the floating label rather than collapsing onto the anchor. One
    /// visibility flag gates both the label and the connector.
    pub fn project(
        &self,
        anchor_id: &str,
        world: &Point3<f32>,
        camera: &Camera,
        viewport: &Viewport,
    ) -> Result<ProjectedLabel> {
        let Some(ndc) = world_to_ndc(camera, world) else {
            return Ok(ProjectedLabel {
                anchor_id: anchor_id.to_owned(),
                anchor_world: *world,
                screen_x: 0.0,
                screen_y: 0.0,
                visible: false,
                connector_world_end: *world,
            });
        };

        let (screen_x, anchor_screen_y) = ndc_to_screen(&ndc, viewport);
        let screen_y = anchor_screen_y - self.label_offset_px;
        let visible = (-1.0..=1.0).contains(&ndc.z);

        let label_ndc = screen_to_ndc(screen_x, screen_y, viewport, self.connector_depth_ndc);
        let connector_world_end = ndc_to_world(camera, &label_ndc)?;

        Ok(ProjectedLabel {
            anchor_id: anchor_id.to_owned(),
            anchor_world: *world,
            screen_x,
            screen_y,
            visible,
            connector_world_end,
        })
    }
}
