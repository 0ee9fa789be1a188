//! linebridge CLI library
//!
//! This library provides the command-line interface over the
//! `linebridge-core` line and chunk adapters.

pub mod commands;
pub mod output;
pub mod progress;

use anyhow::{Context, Result};
use linebridge_core::BridgeConfig;
use std::path::Path;

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}

/// Load the configuration file, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    match path {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            BridgeConfig::load(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))
        }
        None => Ok(BridgeConfig::default()),
    }
}
