//! Discrete turntable rotation state machine
//!
//! Horizontal drag motion accumulates in pixels; every time the accumulated
//! motion exceeds the threshold, the angle advances by exactly one step and
//! the accumulator re-anchors at the current pointer position. Stepping is
//! therefore rate-limited to one step per threshold-worth of continuous
//! motion, not one step per gesture.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Default number of rotation steps per full revolution
pub const DEFAULT_STEP_COUNT: u32 = 38;

/// Horizontal pixel motion required to commit one rotation step
pub const DRAG_STEP_THRESHOLD_PX: f32 = 10.0;

/// Discrete rotation state: a whole number of steps around the turntable
///
/// The angle is only ever mutated through [`StepRotation`], which keeps it
/// wrapped into `[0, 2π)` and on a step boundary after every drag commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    angle: f32,
    step_count: u32,
}

impl RotationState {
    /// Current rotation angle in radians, wrapped into `[0, 2π)`
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Number of discrete steps per full revolution
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Angular size of one step
    pub fn step_angle(&self) -> f32 {
        TAU / self.step_count as f32
    }
}

/// Accumulates drag motion and steps the rotation angle
#[derive(Debug, Clone)]
pub struct StepRotation {
    state: RotationState,
    accumulated_px: f32,
}

impl StepRotation {
    /// Create a state machine at angle zero
    ///
    /// A zero step count falls back to the default, matching the
    /// recoverable-input policy of [`set_step_count`](Self::set_step_count).
    pub fn new(step_count: u32) -> Self {
        let step_count = if step_count > 0 {
            step_count
        } else {
            DEFAULT_STEP_COUNT
        };
        Self {
            state: RotationState {
                angle: 0.0,
                step_count,
            },
            accumulated_px: 0.0,
        }
    }

    /// Current rotation state
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Current rotation angle in radians
    pub fn angle(&self) -> f32 {
        self.state.angle
    }

    /// Re-anchor the accumulator at the start of a drag gesture
    pub fn begin_drag(&mut self) {
        self.accumulated_px = 0.0;
    }

    /// Feed incremental horizontal drag motion in pixels
    ///
    /// Returns `true` when the accumulated motion crossed the threshold and
    /// exactly one step committed; the caller must then re-snap the frame
    /// and model orientation.
    pub fn apply_drag_delta(&mut self, delta_px: f32) -> bool {
        self.accumulated_px += delta_px;
        if self.accumulated_px.abs() <= DRAG_STEP_THRESHOLD_PX {
            return false;
        }
        let direction = if self.accumulated_px > 0.0 { 1.0 } else { -1.0 };
        let step = self.state.step_angle();
        self.state.angle = (self.state.angle + direction * step + TAU) % TAU;
        self.accumulated_px = 0.0;
        true
    }

    /// Reconfigure the number of steps per revolution
    ///
    /// A non-positive count silently reverts to the default of 38 rather
    /// than raising an error. The current angle is rewrapped but not
    /// renormalized to the new step grid.
    pub fn set_step_count(&mut self, requested: i64) {
        if requested > 0 && requested <= u32::MAX as i64 {
            self.state.step_count = requested as u32;
        } else {
            log::debug!("step count {requested} rejected, reverting to {DEFAULT_STEP_COUNT}");
            self.state.step_count = DEFAULT_STEP_COUNT;
        }
        self.state.angle = self.state.angle.rem_euclid(TAU);
    }

    /// Reconfigure the step count from raw text input
    ///
    /// Non-numeric input follows the same silent fallback as a non-positive
    /// count.
    pub fn set_step_count_from_text(&mut self, input: &str) {
        match input.trim().parse::<i64>() {
            Ok(requested) => self.set_step_count(requested),
            Err(_) => {
                log::debug!("step count input {input:?} is not an integer, reverting to default");
                self.set_step_count(0);
            }
        }
    }
}

impl Default for StepRotation {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_COUNT)
    }
}
