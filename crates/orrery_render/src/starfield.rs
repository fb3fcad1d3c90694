use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use orrery_sim::Starfield;

#[derive(Component)]
pub struct StarfieldVisual;

/// Single point-list mesh holding every star
pub fn starfield_mesh(starfield: &Starfield) -> Mesh {
    let positions = starfield.points().to_vec();
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}

pub fn spawn_starfield(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    starfield: &Starfield,
) {
    let mesh = meshes.add(starfield_mesh(starfield));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        StarfieldVisual,
    ));

    info!("Starfield spawned with {} points", starfield.len());
}
