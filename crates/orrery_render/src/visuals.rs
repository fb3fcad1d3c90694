//! Bevy side of the scene collaborators.
//!
//! Assembly goes through [`BevySceneBuilder`], which spawns one entity per
//! mesh tagged with its [`SceneVisual`] handle. After that, transforms reach
//! the entities by handle in [`sync_body_transforms`].

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use orrery_core::{GeometrySpec, MaterialSpec, MeshHandle};
use orrery_sim::{BodyTransform, SceneRenderer, SimulationContext, TransformSink};
use std::collections::HashMap;

/// Entity backing a renderer-owned mesh
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneVisual {
    pub handle: MeshHandle,
}

/// Maps mesh handles handed to the simulation back to their entities
/// while the scene is being built
#[derive(Debug, Default)]
pub struct VisualRegistry {
    entities: Vec<Entity>,
}

impl VisualRegistry {
    pub fn entity(&self, handle: MeshHandle) -> Option<Entity> {
        self.entities.get(handle.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

pub fn to_bevy_transform(transform: &BodyTransform) -> Transform {
    Transform {
        translation: transform.translation.as_vec3(),
        rotation: transform.quat().as_quat(),
        scale: Vec3::ONE,
    }
}

pub fn build_mesh(geometry: &GeometrySpec) -> Mesh {
    match *geometry {
        GeometrySpec::Sphere { radius, segments } => {
            Sphere::new(radius).mesh().uv(segments, segments)
        }
        GeometrySpec::Ring {
            inner_radius,
            outer_radius,
            segments,
        } => Mesh::from(
            Annulus::new(inner_radius, outer_radius)
                .mesh()
                .resolution(segments),
        ),
    }
}

pub fn build_material(material: &MaterialSpec, asset_server: &AssetServer) -> StandardMaterial {
    let [r, g, b, a] = material.base_color;
    let emissive = match material.emissive {
        Some(([er, eg, eb], intensity)) => LinearRgba::from(Color::srgb(er, eg, eb)) * intensity,
        None => LinearRgba::BLACK,
    };

    StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        // Missing textures just leave the base colour until (if ever) they load
        base_color_texture: material
            .texture
            .as_ref()
            .map(|path| asset_server.load(path.clone())),
        emissive,
        unlit: true,
        double_sided: material.double_sided,
        cull_mode: if material.double_sided {
            None
        } else {
            Some(Face::Back)
        },
        alpha_mode: if material.is_transparent() {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

/// Scene renderer used once, at startup, to spawn the bodies and the ring
pub struct BevySceneBuilder<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    asset_server: &'a AssetServer,
    registry: VisualRegistry,
}

impl<'a, 'w, 's> BevySceneBuilder<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        materials: &'a mut Assets<StandardMaterial>,
        asset_server: &'a AssetServer,
    ) -> Self {
        Self {
            commands,
            meshes,
            materials,
            asset_server,
            registry: VisualRegistry::default(),
        }
    }

    pub fn into_registry(self) -> VisualRegistry {
        self.registry
    }
}

impl TransformSink for BevySceneBuilder<'_, '_, '_> {
    fn set_transform(&mut self, mesh: MeshHandle, transform: &BodyTransform) {
        if let Some(entity) = self.registry.entity(mesh) {
            self.commands
                .entity(entity)
                .insert(to_bevy_transform(transform));
        }
    }
}

impl SceneRenderer for BevySceneBuilder<'_, '_, '_> {
    fn create_mesh(&mut self, geometry: &GeometrySpec, material: &MaterialSpec) -> MeshHandle {
        let handle = MeshHandle(self.registry.entities.len() as u32);
        let mesh = self.meshes.add(build_mesh(geometry));
        let material = self
            .materials
            .add(build_material(material, self.asset_server));

        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::IDENTITY,
                SceneVisual { handle },
            ))
            .id();
        self.registry.entities.push(entity);
        handle
    }

    fn attach_child(&mut self, parent: MeshHandle, child: MeshHandle, local: &BodyTransform) {
        let (Some(parent), Some(child)) = (self.registry.entity(parent), self.registry.entity(child))
        else {
            warn!("attach_child with unknown mesh handle");
            return;
        };
        self.commands
            .entity(child)
            .insert(to_bevy_transform(local));
        self.commands.entity(parent).add_child(child);
    }
}

/// Latest transform per mesh, collected from the simulation each frame
#[derive(Debug, Default)]
pub struct TransformBuffer {
    transforms: HashMap<MeshHandle, BodyTransform>,
}

impl TransformBuffer {
    pub fn get(&self, mesh: MeshHandle) -> Option<&BodyTransform> {
        self.transforms.get(&mesh)
    }
}

impl TransformSink for TransformBuffer {
    fn set_transform(&mut self, mesh: MeshHandle, transform: &BodyTransform) {
        self.transforms.insert(mesh, *transform);
    }
}

/// Push the latest body transforms onto their entities
pub fn sync_body_transforms(
    context: Res<SimulationContext>,
    mut visuals: Query<(&SceneVisual, &mut Transform)>,
) {
    let mut buffer = TransformBuffer::default();
    context.write_transforms(&mut buffer);

    for (visual, mut transform) in &mut visuals {
        if let Some(latest) = buffer.get(visual.handle) {
            *transform = to_bevy_transform(latest);
        }
    }
}
