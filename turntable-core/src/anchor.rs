//! Named anchor points attached to the model
//!
//! An anchor is a node in the model's transform chain, so it follows the
//! discrete turntable rotation for free. Ids are write-once for the session
//! and there is no removal: the model lives as long as the process.

use crate::error::{Error, Result};
use crate::scene::{NodeIndex, SceneGraph};
use crate::transform::Transform3D;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

/// A named point of interest in the model's local frame
#[derive(Debug, Clone)]
pub struct Anchor {
    pub id: String,
    pub node: NodeIndex,
}

/// Write-once registry of anchors
#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    anchors: Vec<Anchor>,
    by_id: HashMap<String, usize>,
}

impl AnchorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered anchors
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Check if no anchors are registered
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Attach a new anchor under `parent` at a local position
    ///
    /// Ids are write-once: registering an id twice is an error rather than a
    /// silent overwrite.
    pub fn register(
        &mut self,
        id: &str,
        local_position: Vector3<f32>,
        scene: &mut SceneGraph,
        parent: NodeIndex,
    ) -> Result<NodeIndex> {
        if self.by_id.contains_key(id) {
            return Err(Error::InvalidData(format!(
                "anchor id '{id}' is already registered"
            )));
        }
        let node = scene.add_child(parent, Transform3D::translation(local_position))?;
        self.by_id.insert(id.to_owned(), self.anchors.len());
        self.anchors.push(Anchor {
            id: id.to_owned(),
            node,
        });
        Ok(node)
    }

    /// Look up an anchor by id
    pub fn get(&self, id: &str) -> Option<&Anchor> {
        self.by_id.get(id).map(|&index| &self.anchors[index])
    }

    /// Iterate over anchors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    /// Resolve one anchor through the current model transform chain
    pub fn world_position_of(&self, id: &str, scene: &SceneGraph) -> Result<Point3<f32>> {
        let anchor = self
            .get(id)
            .ok_or_else(|| Error::InvalidData(format!("unknown anchor id '{id}'")))?;
        scene.world_position(anchor.node)
    }

    /// Resolve every anchor to its current world position
    pub fn resolve_all(&self, scene: &SceneGraph) -> Result<Vec<(String, Point3<f32>)>> {
        self.anchors
            .iter()
            .map(|anchor| Ok((anchor.id.clone(), scene.world_position(anchor.node)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(Transform3D::identity());
        let mut registry = AnchorRegistry::new();

        registry
            .register("roof", Vector3::new(2.0, 1.5, 0.0), &mut scene, root)
            .unwrap();
        let duplicate = registry.register("roof", Vector3::new(0.0, 0.0, 0.0), &mut scene, root);
        assert!(duplicate.is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_anchor_follows_model_rotation() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(Transform3D::identity());
        let mut registry = AnchorRegistry::new();
        registry
            .register("roof", Vector3::new(2.0, 1.5, 0.0), &mut scene, root)
            .unwrap();

        scene.set_rotation_y(root, PI).unwrap();
        let world = registry.world_position_of("roof", &scene).unwrap();
        assert_relative_eq!(world.x, -2.0, epsilon = 1e-5);
        assert_relative_eq!(world.y, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let scene = SceneGraph::new();
        let registry = AnchorRegistry::new();
        assert!(registry.world_position_of("ghost", &scene).is_err());
    }

    #[test]
    fn test_resolve_all_preserves_registration_order() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(Transform3D::identity());
        let mut registry = AnchorRegistry::new();
        registry
            .register("roof", Vector3::new(2.0, 1.5, 0.0), &mut scene, root)
            .unwrap();
        registry
            .register("door", Vector3::new(0.0, 0.0, 2.5), &mut scene, root)
            .unwrap();

        let resolved = registry.resolve_all(&scene).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0, "roof");
        assert_eq!(resolved[1].0, "door");
        assert_relative_eq!(resolved[1].1.z, 2.5, epsilon = 1e-6);
    }
}
