//! Command handlers for the Enumerator CLI.

pub mod emit;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod validate;

use crate::cli::Cli;
use enumerator_core::{EnumeratorConfig, LoadedConfig, Result};
use tracing::{error, info};

/// Loads the file named by `--config`, or searches upward for enumerator.toml.
pub(crate) fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    match EnumeratorConfig::load(cli.config.as_deref()) {
        Ok(config) => {
            info!("Configuration loaded from {:?}", config.path);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}
