//! Emit command - generates one enum described entirely by flags.

use crate::cli::{Cli, EmitArgs};
use enumerator_core::{EnumSpec, JsonMarshalOptions, MarshalOptions, Result, generate, render_spec};
use tracing::info;

/// Runs the emit command.
pub fn run(_cli: &Cli, args: EmitArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let spec = spec_from_args(args);

    if dry_run {
        print!("{}", render_spec(&spec)?);
        return Ok(());
    }

    let file = generate(&spec)?;
    info!(
        "{} [{}] written to {:?} ({} bytes)",
        file.type_name, file.shape, file.path, file.bytes_written
    );
    Ok(())
}

pub(crate) fn spec_from_args(args: EmitArgs) -> EnumSpec {
    EnumSpec {
        destination: args.destination,
        copyright_file: args.copyright_file,
        package: args.package,
        type_name: args.type_name,
        values: args.values,
        undefined_value: args.undefined,
        marshalling: MarshalOptions {
            json: JsonMarshalOptions {
                generate: args.json,
                nil_to_undefined: args.nil_to_undefined,
            },
        },
    }
}
