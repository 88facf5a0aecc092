//! Model source seam
//!
//! The real model parser is an external collaborator. All the viewer needs
//! is something that produces a scene graph with a root node the turntable
//! rotation and the anchors can attach to.

use turntable_core::{NodeIndex, Result, SceneGraph, Transform3D};

/// Produces a scene graph for the viewer to adopt
pub trait ModelSource {
    /// Build (or hand over) the model's scene graph and its root node
    fn load_model(&self) -> Result<(SceneGraph, NodeIndex)>;
}

/// A model whose scene graph is already built in memory
#[derive(Debug, Clone)]
pub struct StaticModel {
    graph: SceneGraph,
    root: NodeIndex,
}

impl StaticModel {
    /// Wrap a prebuilt scene graph
    pub fn new(graph: SceneGraph, root: NodeIndex) -> Self {
        Self { graph, root }
    }

    /// A minimal model: a single root node at the origin
    pub fn empty() -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.add_root(Transform3D::identity());
        Self { graph, root }
    }
}

impl ModelSource for StaticModel {
    fn load_model(&self) -> Result<(SceneGraph, NodeIndex)> {
        Ok((self.graph.clone(), self.root))
    }
}
