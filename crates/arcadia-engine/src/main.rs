//! Demo host for the Arcadia workspace.
//!
//! Runs a single heroine through a scripted or seeded sequence of inputs,
//! with an achievement tracker and an event journal listening on the bus,
//! then logs a summary of the run.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ARCADIA_CONFIG` or `arcadia-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the schedule and run the tick loop
//! 4. Log the summary

mod config;
mod error;
mod journal;
mod runner;
mod schedule;

use std::path::PathBuf;

use arcadia_types::EventKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ArcadiaConfig;
use crate::error::EngineError;

/// Environment variable naming an alternative config file.
const CONFIG_PATH_ENV: &str = "ARCADIA_CONFIG";

/// Config file used when `ARCADIA_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "arcadia-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or the run fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config first: the log level lives in it.
    let (config, from_file) = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("arcadia-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        ticks = config.run.ticks,
        tick_ms = config.run.tick_ms,
        mode = ?config.run.mode,
        seed = config.run.seed,
        max_charge = config.heroine.max_charge,
        "Configuration loaded"
    );

    let summary = runner::run(&config)?;

    info!(
        entity = %summary.entity,
        ticks = summary.ticks,
        final_state = %summary.final_state,
        transitions = summary.transitions,
        listener_failures = summary.listener_failures,
        "Run complete"
    );
    for kind in EventKind::ALL {
        let count = summary.events.get(&kind).copied().unwrap_or(0);
        info!(?kind, count, "Events published");
    }
    for achievement in &summary.achievements {
        info!(?achievement, "Achievement");
    }

    Ok(())
}

/// Load the config file, or defaults when it does not exist.
///
/// The second value reports whether a file was read.
fn load_config() -> Result<(ArcadiaConfig, bool), EngineError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        Ok((ArcadiaConfig::from_file(&path)?, true))
    } else {
        let mut config = ArcadiaConfig::default();
        config.logging.apply_env_override();
        Ok((config, false))
    }
}
