use bevy::prelude::*;
use orrery_sim::SimulationConfig;

/// Marker for the main perspective camera
#[derive(Component)]
pub struct OrreryCamera;

pub fn spawn_camera(mut commands: Commands, config: Res<SimulationConfig>) {
    let camera = &config.camera;
    let pos = Vec3::new(0.0, 0.0, camera.distance);

    info!(
        "Camera spawned at ({:.0}, {:.0}, {:.0}), fov {}°",
        pos.x, pos.y, pos.z, camera.fov_degrees
    );

    commands.spawn((
        Camera3d::default(),
        IsDefaultUiCamera,
        Projection::from(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_translation(pos).looking_at(Vec3::ZERO, Vec3::Y),
        OrreryCamera,
    ));
}

/// Ambient fill, a point light at the sun and a weak directional light.
/// Bodies are unlit so this only matters for anything lit added later.
pub fn spawn_lights(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: 3.0 * 1_000_000.0,
            range: 1000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));

    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 1_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(50.0, 50.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
