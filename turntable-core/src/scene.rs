//! Transform-node arena for the model's scene graph
//!
//! Nodes refer to their parent by index rather than by reference, so the
//! graph cannot form ownership cycles: a parent must already exist when a
//! child is inserted, which keeps every parent index strictly below its
//! children. World-position resolution walks the index chain.

use crate::error::{Error, Result};
use crate::transform::Transform3D;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Index of a node in the scene-graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

/// A single transform node
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeIndex>,
    pub local: Transform3D,
    pub visible: bool,
}

/// Arena of transform nodes
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether an index refers to a node in this arena
    pub fn contains(&self, node: NodeIndex) -> bool {
        node.0 < self.nodes.len()
    }

    /// Insert a parentless node
    pub fn add_root(&mut self, local: Transform3D) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            local,
            visible: true,
        });
        index
    }

    /// Insert a node under an existing parent
    pub fn add_child(&mut self, parent: NodeIndex, local: Transform3D) -> Result<NodeIndex> {
        if !self.contains(parent) {
            return Err(Error::InvalidData(format!(
                "parent node index {} is out of bounds",
                parent.0
            )));
        }
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            local,
            visible: true,
        });
        Ok(index)
    }

    fn node(&self, index: NodeIndex) -> Result<&Node> {
        self.nodes.get(index.0).ok_or_else(|| {
            Error::InvalidData(format!("node index {} is out of bounds", index.0))
        })
    }

    fn node_mut(&mut self, index: NodeIndex) -> Result<&mut Node> {
        self.nodes.get_mut(index.0).ok_or_else(|| {
            Error::InvalidData(format!("node index {} is out of bounds", index.0))
        })
    }

    /// Replace a node's local transform
    pub fn set_local(&mut self, index: NodeIndex, local: Transform3D) -> Result<()> {
        self.node_mut(index)?.local = local;
        Ok(())
    }

    /// Replace a node's local transform with a pure Y rotation
    ///
    /// This is the turntable spin applied to the model root; any previous
    /// local transform of the node is discarded.
    pub fn set_rotation_y(&mut self, index: NodeIndex, angle: f32) -> Result<()> {
        self.set_local(index, Transform3D::rotation_y(angle))
    }

    /// Set a node's own visibility flag
    pub fn set_visible(&mut self, index: NodeIndex, visible: bool) -> Result<()> {
        self.node_mut(index)?.visible = visible;
        Ok(())
    }

    /// Effective visibility: a node is visible only if every ancestor is
    pub fn is_visible(&self, index: NodeIndex) -> Result<bool> {
        let mut current = Some(index);
        while let Some(at) = current {
            let node = self.node(at)?;
            if !node.visible {
                return Ok(false);
            }
            current = node.parent;
        }
        Ok(true)
    }

    /// Resolve a node's world transform by walking the parent chain
    pub fn world_transform(&self, index: NodeIndex) -> Result<Transform3D> {
        let start = self.node(index)?;
        let mut world = start.local;
        let mut parent = start.parent;
        while let Some(at) = parent {
            let ancestor = self.node(at)?;
            world = ancestor.local.compose(world);
            parent = ancestor.parent;
        }
        Ok(world)
    }

    /// Resolve a node's world position (its local origin in world space)
    pub fn world_position(&self, index: NodeIndex) -> Result<Point3<f32>> {
        Ok(self
            .world_transform(index)?
            .transform_point(&Point3::origin()))
    }
}
