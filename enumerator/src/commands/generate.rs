//! Generate command - renders every configured enum and writes it.

use crate::cli::{Cli, GenerateArgs};
use crate::commands::load_config;
use enumerator_core::{CheckStatus, EnumGenerator, EnumeratorError, Result};
use tracing::{debug, error, info};

/// Runs the generate command with default settings.
pub fn run_default(cli: &Cli) -> Result<()> {
    run(cli, GenerateArgs::default())
}

/// Runs the generate command.
pub fn run(cli: &Cli, args: GenerateArgs) -> Result<()> {
    info!("Starting Enumerator code generation");

    let config = load_config(cli)?;
    let generator = EnumGenerator::from_config(&config)?.only(&args.only)?;
    debug!("{} enums selected", generator.specs().len());

    if args.dry_run {
        for file in generator.render_all()? {
            println!("// ==== {} ====", file.path.display());
            print!("{}", file.content);
        }
        return Ok(());
    }

    if args.check {
        let results = generator.check_all()?;
        let mut first_stale = None;
        for file in &results {
            match file.status {
                CheckStatus::UpToDate => info!("  {}: up to date", file.type_name),
                status => {
                    error!("  {}: {:?} ({:?})", file.type_name, status, file.path);
                    first_stale.get_or_insert_with(|| file.path.clone());
                }
            }
        }
        if let Some(path) = first_stale {
            return Err(EnumeratorError::OutOfDate { path });
        }
        info!("All {} generated files are up to date", results.len());
        return Ok(());
    }

    let report = generator.generate_all()?;
    for file in &report.files {
        info!(
            "  {} [{}] -> {:?} ({} bytes)",
            file.type_name, file.shape, file.path, file.bytes_written
        );
    }

    info!("Enumerator code generation completed successfully");
    Ok(())
}
