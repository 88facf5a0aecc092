//! Input events consumed by the viewer session
//!
//! The host's UI plumbing translates raw pointer and window callbacks into
//! these explicit messages. The session drains them in arrival order at the
//! start of each tick, strictly before that tick's projection pass.

/// A single host input event
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed: a drag gesture may begin
    DragStarted { x: f32 },
    /// Pointer moved; only meaningful while a drag is active
    DragMoved { x: f32 },
    /// Pointer released
    DragEnded,
    /// Discrete click, hit-tested against the anchors
    PointerClicked { x: f32, y: f32 },
    /// Host window resized
    Resized { width: f32, height: f32 },
    /// The step-count text input changed
    StepCountChanged { input: String },
    /// Whole-model visibility toggle
    ModelVisibilityToggled,
}
