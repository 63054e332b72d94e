use glam::Vec3;
use crate::api::types::NodeId;
use crate::components::mesh::{MeshComponent, Rgba};

/// What a node draws, if anything.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-only node (orbit pivots, grouping).
    Group,
    /// A lit sphere.
    Sphere(MeshComponent),
    /// A line strip in local space. Closed loops repeat the first point at the end.
    Polyline { points: Vec<Vec3>, color: Rgba, width: f32 },
    /// A point cloud in local space.
    Points { points: Vec<Vec3>, color: Rgba, size: f32 },
}

impl NodeKind {
    pub fn is_sphere(&self) -> bool {
        matches!(self, NodeKind::Sphere(_))
    }
}

/// Scene-graph node. A single struct with an optional drawable,
/// chosen for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Node {
    /// Arena index, assigned by `SceneGraph::spawn`.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Parent node. `None` = attached to the scene root.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    /// Whether this node is drawn and pickable.
    pub active: bool,
    /// Position relative to the parent.
    pub local_position: Vec3,
    /// Rotation about the local Y axis, radians.
    pub rotation_y: f32,
    /// Index into a game-owned state array (arena back-reference).
    pub state_index: Option<usize>,
}

impl Node {
    /// Create a node of the given kind at the local origin.
    /// The id is a placeholder until the node is spawned.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId(u32::MAX),
            tag: String::new(),
            parent: None,
            kind,
            active: true,
            local_position: Vec3::ZERO,
            rotation_y: 0.0,
            state_index: None,
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn sphere(mesh: MeshComponent) -> Self {
        Self::new(NodeKind::Sphere(mesh))
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.local_position = position;
        self
    }

    pub fn with_rotation(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn with_state_index(mut self, index: usize) -> Self {
        self.state_index = Some(index);
        self
    }

    /// Sphere mesh, if this node is one.
    pub fn mesh(&self) -> Option<&MeshComponent> {
        match &self.kind {
            NodeKind::Sphere(mesh) => Some(mesh),
            _ => None,
        }
    }
}
