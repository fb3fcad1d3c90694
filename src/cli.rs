use clap::{Args, Parser};
use orrery_core::{ConfigError, OrreryConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Options shared by the windowed app and the headless run
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long, env = "ORRERY_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter override, e.g. `debug` or `orrery_sim=debug`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl CommonArgs {
    pub fn load_config(&self) -> Result<OrreryConfig, ConfigError> {
        OrreryConfig::load(self.config.as_deref())
    }
}

/// Solar-system orrery with adjustable orbital speeds
#[derive(Parser, Debug)]
#[command(name = "orrery", version, about)]
pub struct OrreryArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Headless orrery run printing body positions
#[derive(Parser, Debug)]
#[command(name = "simulate", version, about)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60)]
    pub seconds: u32,

    /// Fixed frames per simulated second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,
}

/// Install a stdout subscriber. `RUST_LOG` applies unless a filter is given.
/// Fails if a global subscriber is already set.
pub fn init_logging(filter: Option<&str>) -> Result<(), TryInitError> {
    let filter = match filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).finish().try_init()
}
