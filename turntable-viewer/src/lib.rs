//! Viewer session orchestration for the turntable product viewer
//!
//! Wires the core state machines to host input: a [`ViewerSession`] context
//! object drains explicit input events once per tick, keeps the pre-rendered
//! frame and the model orientation in lockstep, projects every anchor into
//! the label overlay, and dispatches click hit-tests to a notifier.

pub mod config;
pub mod event;
pub mod notify;
pub mod overlay;
pub mod session;

pub use config::*;
pub use event::*;
pub use notify::*;
pub use overlay::*;
pub use session::*;
