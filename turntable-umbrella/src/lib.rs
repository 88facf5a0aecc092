//! # Turntable
//!
//! An interactive turntable product viewer core for Rust.
//!
//! This is the umbrella crate that provides convenient access to the whole
//! viewer stack. You can use this crate to get everything in one place, or
//! use the individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: rotation state machine, frame index table, scene-graph arena,
//!   screen projection and ray picking
//! - **Assets**: frame fetching and bulk preload with progress reporting
//! - **Viewer**: the `ViewerSession` context object, input events, overlay
//!   sync, and hit-test dispatch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turntable::prelude::*;
//!
//! fn main() -> turntable_core::Result<()> {
//!     let mut scene = SceneGraph::new();
//!     let root = scene.add_root(Transform3D::identity());
//!
//!     let frames = FrameSet::sequential("images/36_", "_Ultra.jpeg", 38)?;
//!     let fetcher = DirectoryFetcher::new("assets");
//!     let loaded = preload_frames(&frames, &fetcher, |percent| {
//!         println!("Loading... {percent}%");
//!     })?;
//!
//!     let mut session = ViewerSession::new(
//!         ViewerConfig::default(),
//!         scene,
//!         root,
//!         frames,
//!         loaded,
//!         Viewport::new(1280.0, 720.0),
//!     )?;
//!     session.register_anchor("roof", Vector3f::new(2.0, 1.5, 0.0), "You clicked the Roof!")?;
//!     session.tick(&mut NullNotifier)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables assets and viewer
//! - `assets`: Frame fetching and preloading
//! - `viewer`: Session orchestration and presentation sync

// Re-export core functionality
pub use turntable_core::*;

// Re-export sub-crates
#[cfg(feature = "assets")]
pub use turntable_assets as assets;

#[cfg(feature = "viewer")]
pub use turntable_viewer as viewer;

/// Convenient imports for common use cases
pub mod prelude {
    pub use turntable_core::*;

    #[cfg(feature = "assets")]
    pub use turntable_assets::*;

    #[cfg(feature = "viewer")]
    pub use turntable_viewer::*;
}
