//! Anchor click notification seam
//!
//! The host decides how a notification surfaces (modal, toast, console);
//! the session only reports which anchor was hit and its message.

/// User-facing notification channel for anchor clicks
pub trait AnchorNotifier {
    /// Report a click on a named anchor
    fn notify(&mut self, anchor_id: &str, message: &str);
}

/// Discards all notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl AnchorNotifier for NullNotifier {
    fn notify(&mut self, _anchor_id: &str, _message: &str) {}
}
