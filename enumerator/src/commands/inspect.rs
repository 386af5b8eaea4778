//! Inspect command - displays the shape of each configured enum.

use crate::cli::{Cli, InspectArgs, InspectFormat};
use crate::commands::load_config;
use enumerator_core::{Capability, CodeModel, EnumSpec, EnumeratorError, Result, Shape};
use serde::Serialize;
use std::path::PathBuf;

/// What the generator would emit for one enum.
#[derive(Debug, Clone, Serialize)]
pub struct EnumSummary {
    pub type_name: String,
    pub package: String,
    pub destination: PathBuf,
    pub shape: Shape,
    pub capabilities: Vec<Capability>,
    pub values: Vec<String>,
    pub undefined_value: Option<String>,
}

impl EnumSummary {
    pub fn from_spec(spec: &EnumSpec) -> Result<Self> {
        let model =
            CodeModel::build(spec, None).map_err(|e| EnumeratorError::spec(&spec.type_name, e))?;
        Ok(Self {
            type_name: model.type_name().to_string(),
            package: model.package().to_string(),
            destination: spec.destination.clone(),
            shape: model.shape(),
            capabilities: model.capabilities(),
            values: model.values().to_vec(),
            undefined_value: model.undefined().map(str::to_string),
        })
    }
}

/// Runs the inspect command.
pub fn run(cli: &Cli, args: InspectArgs) -> Result<()> {
    let config = load_config(cli)?;
    let summaries = config
        .specs()?
        .iter()
        .map(EnumSummary::from_spec)
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        InspectFormat::Pretty => print!("{}", format_pretty(&summaries)),
        InspectFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    Ok(())
}

fn format_pretty(summaries: &[EnumSummary]) -> String {
    let mut output = String::from("\n=== Enums ===\n");
    for summary in summaries {
        let capabilities: Vec<String> =
            summary.capabilities.iter().map(ToString::to_string).collect();

        output.push_str(&format!("\n{} (package {})\n", summary.type_name, summary.package));
        output.push_str(&format!("  Destination:  {}\n", summary.destination.display()));
        output.push_str(&format!("  Shape:        {}\n", summary.shape));
        output.push_str(&format!("  Capabilities: {}\n", capabilities.join(", ")));
        output.push_str(&format!("  Values:       {}\n", summary.values.join(", ")));
        if let Some(undefined) = &summary.undefined_value {
            output.push_str(&format!("  Undefined:    {}\n", undefined));
        }
    }
    output
}
