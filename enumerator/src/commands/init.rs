//! Init command - initializes enumerator.toml configuration.

use crate::cli::{Cli, InitArgs};
use enumerator_core::config::CONFIG_FILE_NAME;
use enumerator_core::{EnumeratorError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const STARTER_CONFIG: &str = r#"# Enumerator Configuration

[general]
# Base directory for enums without an explicit destination.
# Files land in <output_dir>/<package>/<type_name>.go
output_dir = "${ENUMERATOR_OUTPUT_DIR:-.}"

# License text prepended to every generated file
# copyright_file = "LICENSE"

[[enums]]
type_name = "Color"
package = "color"
values = ["Undefined", "Red", "Green", "Blue"]

# Returned by OfOrUndefined for unknown names
undefined_value = "Undefined"

# Explicit output path, relative to this file
# destination = "internal/color/color.go"

[enums.marshalling.json]
generate = true
# Decode null, absent and unknown JSON to the undefined value
nil_to_undefined = false
"#;

/// Runs the init command.
pub fn run(cli: &Cli, args: InitArgs) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    write_starter_config(&config_path, args.force)?;

    info!("Enumerator initialized successfully!");
    info!("Next steps:");
    info!("  1. Edit {} to describe your enums", config_path.display());
    info!("  2. Run 'enumerator generate' to write the Go sources");
    Ok(())
}

fn write_starter_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        error!("{} already exists. Use --force to overwrite.", path.display());
        return Err(EnumeratorError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    fs::write(path, STARTER_CONFIG)?;
    info!("Created {}", path.display());
    Ok(())
}
