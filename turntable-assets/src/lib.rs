//! Asset loading seams for the turntable viewer
//!
//! Frame images are fetched behind a trait so hosts can supply their own
//! transport; the bundled implementation decodes from the filesystem with
//! the `image` crate. Preloading is all-or-nothing: a viewer session cannot
//! be constructed until every frame has loaded.

pub mod fetch;
pub mod model;
pub mod preload;

pub use fetch::*;
pub use model::*;
pub use preload::*;
