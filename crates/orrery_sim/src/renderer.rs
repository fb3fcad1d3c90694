use orrery_core::{GeometrySpec, MaterialSpec, MeshHandle};
use std::collections::HashMap;

use crate::scene::BodyTransform;

/// Receives per-tick transforms for renderer-owned meshes
pub trait TransformSink {
    fn set_transform(&mut self, mesh: MeshHandle, transform: &BodyTransform);
}

/// The scene graph side of a rendering backend, used once during assembly
pub trait SceneRenderer: TransformSink {
    fn create_mesh(&mut self, geometry: &GeometrySpec, material: &MaterialSpec) -> MeshHandle;

    /// Parent `child` under `parent` with a fixed local transform
    fn attach_child(&mut self, parent: MeshHandle, child: MeshHandle, local: &BodyTransform);
}

#[derive(Debug, Clone)]
pub struct RecordedMesh {
    pub geometry: GeometrySpec,
    pub material: MaterialSpec,
    pub parent: Option<MeshHandle>,
    pub transform: BodyTransform,
}

/// Headless renderer that just remembers what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    meshes: Vec<RecordedMesh>,
    /// Total set_transform calls
    pub writes: usize,
}

impl RecordingRenderer {
    pub fn mesh(&self, handle: MeshHandle) -> Option<&RecordedMesh> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn children_of(&self, parent: MeshHandle) -> Vec<MeshHandle> {
        self.meshes
            .iter()
            .enumerate()
            .filter(|(_, m)| m.parent == Some(parent))
            .map(|(i, _)| MeshHandle(i as u32))
            .collect()
    }

    /// Last transform written for every mesh
    pub fn transforms(&self) -> HashMap<MeshHandle, BodyTransform> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, m)| (MeshHandle(i as u32), m.transform))
            .collect()
    }
}

impl TransformSink for RecordingRenderer {
    fn set_transform(&mut self, mesh: MeshHandle, transform: &BodyTransform) {
        if let Some(recorded) = self.meshes.get_mut(mesh.0 as usize) {
            recorded.transform = *transform;
            self.writes += 1;
        }
    }
}

impl SceneRenderer for RecordingRenderer {
    fn create_mesh(&mut self, geometry: &GeometrySpec, material: &MaterialSpec) -> MeshHandle {
        self.meshes.push(RecordedMesh {
            geometry: *geometry,
            material: material.clone(),
            parent: None,
            transform: BodyTransform::default(),
        });
        MeshHandle((self.meshes.len() - 1) as u32)
    }

    fn attach_child(&mut self, parent: MeshHandle, child: MeshHandle, local: &BodyTransform) {
        if let Some(recorded) = self.meshes.get_mut(child.0 as usize) {
            recorded.parent = Some(parent);
            recorded.transform = *local;
        }
    }
}
