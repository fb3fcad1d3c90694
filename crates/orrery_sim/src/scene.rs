//! Explicit scene hierarchy.
//!
//! Nodes live in an arena and refer to their parent by index. World transforms
//! are composed here (world = parent.world * local) instead of being left to
//! the renderer's own graph.

use bevy::math::{DAffine3, DQuat, DVec3, EulerRot};
use orrery_core::{BodyId, MeshHandle};

/// Translation plus XYZ Euler rotation, relative to the parent node
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyTransform {
    pub translation: DVec3,
    /// Euler angles (radians), applied in X, Y, Z order
    pub rotation: DVec3,
}

impl BodyTransform {
    pub fn at(translation: DVec3) -> Self {
        Self {
            translation,
            rotation: DVec3::ZERO,
        }
    }

    pub fn quat(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(self.quat(), self.translation)
    }

    /// Compose a child's local transform onto this one
    pub fn compose(&self, local: &BodyTransform) -> DAffine3 {
        self.to_affine() * local.to_affine()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Body(BodyId),
    /// Saturn's ring; follows its parent and never moves on its own
    Ring,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub parent: Option<NodeIndex>,
    pub mesh: MeshHandle,
    pub local: BodyTransform,
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn add_root(&mut self, kind: NodeKind, mesh: MeshHandle, local: BodyTransform) -> NodeIndex {
        self.push(SceneNode {
            kind,
            parent: None,
            mesh,
            local,
        })
    }

    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        kind: NodeKind,
        mesh: MeshHandle,
        local: BodyTransform,
    ) -> NodeIndex {
        debug_assert!(parent.0 < self.nodes.len());
        self.push(SceneNode {
            kind,
            parent: Some(parent),
            mesh,
            local,
        })
    }

    fn push(&mut self, node: SceneNode) -> NodeIndex {
        self.nodes.push(node);
        NodeIndex(self.nodes.len() - 1)
    }

    pub fn node(&self, index: NodeIndex) -> &SceneNode {
        &self.nodes[index.0]
    }

    pub fn set_local(&mut self, index: NodeIndex, local: BodyTransform) {
        self.nodes[index.0].local = local;
    }

    /// World transform: parents composed outermost first
    pub fn world_transform(&self, index: NodeIndex) -> DAffine3 {
        let node = self.node(index);
        let local = node.local.to_affine();
        match node.parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
