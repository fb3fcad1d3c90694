use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use orrery::cli::OrreryArgs;
use orrery_render::plugin::OrreryRenderPlugin;
use orrery_render::ui::ControlsPlugin;
use orrery_sim::{SimulationConfig, SimulationPlugin};

fn main() {
    let args = OrreryArgs::parse();

    // Fatal before any window opens
    let config = match args.common.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("orrery: {e}");
            std::process::exit(1);
        }
    };

    let log = match &args.common.log_level {
        Some(filter) => LogPlugin {
            filter: format!("{},{filter}", LogPlugin::default().filter),
            ..default()
        },
        None => LogPlugin::default(),
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Orrery: Solar System".into(),
                        resolution: (1920.0, 1080.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(log),
        )
        .insert_resource(SimulationConfig {
            config,
            source: args.common.config,
        })
        .add_plugins(SimulationPlugin)
        .add_plugins(OrreryRenderPlugin)
        .add_plugins(ControlsPlugin)
        .run();
}
