use bevy::prelude::*;
use orrery_sim::{OrrerySet, SimulationConfig, SimulationContext};

use super::camera;
use super::starfield;
use super::visuals::{self, BevySceneBuilder};

/// Scene assembly, transform sync, starfield, lights and camera
pub struct OrreryRenderPlugin;

impl Plugin for OrreryRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(
                Startup,
                (assemble_scene, camera::spawn_camera, camera::spawn_lights),
            )
            .add_systems(
                Update,
                visuals::sync_body_transforms
                    .in_set(OrrerySet::Sync)
                    .run_if(resource_exists::<SimulationContext>),
            );
    }
}

/// Build the bodies, the ring and the starfield, then hand the simulation
/// context over to the ECS
fn assemble_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<SimulationConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let mut builder =
        BevySceneBuilder::new(&mut commands, &mut meshes, &mut materials, &asset_server);

    let context = match SimulationContext::assemble(&config, &mut builder) {
        Ok(context) => context,
        Err(e) => {
            error!("Scene assembly failed: {e}");
            exit.send(AppExit::error());
            return;
        }
    };
    let registry = builder.into_registry();
    info!("Scene assembled: {} visuals", registry.len());

    starfield::spawn_starfield(&mut commands, &mut meshes, &mut materials, context.starfield());

    commands.insert_resource(context);
}
