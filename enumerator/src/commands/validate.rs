//! Validate command - validates configuration and every enum specification.

use crate::cli::Cli;
use crate::commands::load_config;
use enumerator_core::validation::validate_all;
use enumerator_core::{EnumeratorError, Result, license};
use tracing::{error, info};

/// Runs the validate command.
///
/// Every failure is reported before the command fails.
pub fn run(cli: &Cli) -> Result<()> {
    info!("Validating Enumerator configuration");

    let config = load_config(cli)?;
    info!("  Configuration file: OK");

    let specs = config.specs()?;
    info!("  Destinations: OK ({} enums)", specs.len());

    let mut failures = 0;
    for (spec, err) in validate_all(&specs) {
        error!("  {}: {}", spec.type_name, err);
        failures += 1;
    }

    for spec in &specs {
        if let Err(e) = license::load(spec.copyright_file.as_deref()) {
            error!("  {}: {}", spec.type_name, e);
            failures += 1;
        }
    }

    if failures > 0 {
        error!("Validation failed with {} errors", failures);
        return Err(EnumeratorError::config(format!(
            "{} validation errors across {} enums",
            failures,
            specs.len()
        )));
    }

    info!("Validation passed");
    Ok(())
}
