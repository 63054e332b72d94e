use glam::{Mat4, Vec3};
use crate::api::types::NodeId;
use crate::components::node::{Node, NodeKind};

/// Scene-graph storage: a flat arena of nodes addressed by index.
/// Designed for small node counts (tens, not millions). Nodes are never
/// removed, so a `NodeId` stays valid for the lifetime of the scene.
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
        }
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the scene and return its id.
    /// Parents must already exist; an unknown parent attaches the node to the root.
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(parent) = node.parent {
            if parent.index() >= self.nodes.len() {
                log::warn!("node '{}' spawned with unknown parent {:?}; attaching to root", node.tag, parent);
                node.parent = None;
            }
        }
        node.id = id;
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Set a node's local Y rotation. Unknown ids are ignored.
    pub fn set_rotation(&mut self, id: NodeId, rotation_y: f32) {
        if let Some(node) = self.get_mut(id) {
            node.rotation_y = rotation_y;
        }
    }

    /// Iterate over all nodes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Direct children of a node.
    pub fn children_of(&self, parent: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.parent == Some(parent))
    }

    /// Count nodes matching a predicate on their kind.
    pub fn count_kind(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.nodes.iter().filter(|n| pred(&n.kind)).count()
    }

    /// Local transform: translate, then rotate about Y.
    fn local_matrix(node: &Node) -> Mat4 {
        Mat4::from_translation(node.local_position) * Mat4::from_rotation_y(node.rotation_y)
    }

    /// World transform of a node, composed from the root down.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = self.get(id);
        while let Some(node) = current {
            matrix = Self::local_matrix(node) * matrix;
            current = node.parent.and_then(|p| self.get(p));
        }
        matrix
    }

    /// World-space origin of a node.
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all nodes. Previously issued ids become dangling.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
