use bevy::prelude::*;
use orrery_core::OrreryConfig;
use std::path::PathBuf;

use super::context::SimulationContext;
use super::events::ControlQueue;

/// Validated configuration the scene is assembled from
#[derive(Resource, Debug, Clone, Deref)]
pub struct SimulationConfig {
    #[deref]
    pub config: OrreryConfig,
    /// File the config was read from, `None` for the built-in defaults
    pub source: Option<PathBuf>,
}

/// Frame phases: UI input is queued, then the simulation ticks, then
/// renderer-side transforms are synced
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrrerySet {
    Input,
    Tick,
    Sync,
}

/// Bevy plugin for the simulation pipeline
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlQueue>()
            .add_systems(
                Startup,
                log_config_source.run_if(resource_exists::<SimulationConfig>),
            )
            .configure_sets(
                Update,
                (OrrerySet::Input, OrrerySet::Tick, OrrerySet::Sync).chain(),
            )
            .add_systems(
                Update,
                simulation_tick
                    .in_set(OrrerySet::Tick)
                    .run_if(resource_exists::<SimulationContext>),
            );
    }
}

/// Main simulation tick: drain queued UI events, then advance the scene
fn simulation_tick(
    mut context: ResMut<SimulationContext>,
    mut queue: ResMut<ControlQueue>,
    time: Res<Time>,
) {
    let dt = time.delta_secs_f64();
    context.tick(queue.drain(), dt);
}

/// Reported at startup since the config is read before the log plugin exists
fn log_config_source(config: Res<SimulationConfig>) {
    match &config.source {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No config file given, using built-in defaults"),
    }
}
