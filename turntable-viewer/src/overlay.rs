//! Label overlay and connector-line presentation state
//!
//! Pure consumer of the projector's output: the session applies each tick's
//! projections here and the host renders from it. Applying the same output
//! twice leaves the state unchanged.

use std::collections::HashMap;
use turntable_core::{Point3f, ProjectedLabel};

/// Screen placement of one floating label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

/// World-space endpoints of one connector line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorLine {
    /// The anchor's world position
    pub start: Point3f,
    /// The unprojected label position
    pub end: Point3f,
    pub visible: bool,
}

/// Live overlay state, rewritten from projector output every tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    labels: HashMap<String, LabelPlacement>,
    lines: HashMap<String, ConnectorLine>,
}

impl OverlayState {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tick's projection output
    ///
    /// A label and its connector line always receive the same visibility
    /// flag; they can never disagree.
    pub fn apply(&mut self, projected: &[ProjectedLabel]) {
        for label in projected {
            self.labels.insert(
                label.anchor_id.clone(),
                LabelPlacement {
                    x: label.screen_x,
                    y: label.screen_y,
                    visible: label.visible,
                },
            );
            self.lines.insert(
                label.anchor_id.clone(),
                ConnectorLine {
                    start: label.anchor_world,
                    end: label.connector_world_end,
                    visible: label.visible,
                },
            );
        }
    }

    /// Placement of one label
    pub fn label(&self, anchor_id: &str) -> Option<&LabelPlacement> {
        self.labels.get(anchor_id)
    }

    /// Endpoints of one connector line
    pub fn line(&self, anchor_id: &str) -> Option<&ConnectorLine> {
        self.lines.get(anchor_id)
    }

    /// Iterate over all label placements
    pub fn labels(&self) -> impl Iterator<Item = (&str, &LabelPlacement)> {
        self.labels.iter().map(|(id, label)| (id.as_str(), label))
    }

    /// Number of anchors represented in the overlay
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the overlay has no entries yet
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
