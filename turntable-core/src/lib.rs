//! Core data structures and math for the turntable product viewer
//!
//! This crate provides the view-synchronization primitives: the discrete
//! rotation state machine, the angle-to-frame index table, the transform-node
//! arena that anchors attach to, and the screen projection and ray picking
//! math that keeps 2D labels in lockstep with the rotating 3D model.

pub mod anchor;
pub mod camera;
pub mod error;
pub mod frames;
pub mod picking;
pub mod projection;
pub mod rotation;
pub mod scene;
pub mod transform;

pub use anchor::*;
pub use camera::*;
pub use error::*;
pub use frames::*;
pub use picking::*;
pub use projection::*;
pub use rotation::*;
pub use scene::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;
