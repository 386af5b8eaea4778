//! Command-line interface definitions for Enumerator.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Enumerator - sealed, string-backed enum types generated as Go source
#[derive(Parser, Debug)]
#[command(name = "enumerator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to enumerator.toml configuration file
    #[arg(short, long, global = true, env = "ENUMERATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v, -vv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate every enum in the configuration file (default)
    Generate(GenerateArgs),

    /// Generate a single enum described by flags
    Emit(EmitArgs),

    /// Validate every enum in the configuration file
    Validate,

    /// Display the shape and capabilities of each configured enum
    Inspect(InspectArgs),

    /// Initialize a new enumerator.toml configuration file
    Init(InitArgs),
}

// ============================================================================
// Generate Arguments
// ============================================================================

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Only generate these types (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Fail if any generated file is missing or out of date; write nothing
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Print the generated source instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// Emit Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct EmitArgs {
    /// Name of the generated interface type
    #[arg(long = "type")]
    pub type_name: String,

    /// Go package clause
    #[arg(long)]
    pub package: String,

    /// Value names in declaration order (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub values: Vec<String>,

    /// Value returned by OfOrUndefined for unknown names
    #[arg(long)]
    pub undefined: Option<String>,

    /// Generate JSON marshalling support
    #[arg(long)]
    pub json: bool,

    /// Decode null, absent and unknown JSON to the undefined value
    #[arg(long, requires = "json")]
    pub nil_to_undefined: bool,

    /// License file prepended as a comment block
    #[arg(long)]
    pub copyright_file: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    pub destination: PathBuf,

    /// Print the generated source instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

// ============================================================================
// Inspect Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: InspectFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Pretty,
    Json,
}

// ============================================================================
// Init Arguments
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing enumerator.toml if present
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["enumerator"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["enumerator", "validate", "-vv", "-c", "conf/enumerator.toml"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("conf/enumerator.toml")));
        assert!(matches!(cli.command, Some(Commands::Validate)));
    }

    #[test]
    fn test_generate_args() {
        let cli =
            Cli::try_parse_from(["enumerator", "generate", "--only", "Color,Shape", "--check"])
                .unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.only, vec!["Color", "Shape"]);
                assert!(args.check);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_check_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["enumerator", "generate", "--check", "--dry-run"]).is_err());
    }

    #[test]
    fn test_emit_args() {
        let cli = Cli::try_parse_from([
            "enumerator",
            "emit",
            "--type",
            "Color",
            "--package",
            "color",
            "--values",
            "Undefined,Red,Green",
            "--undefined",
            "Undefined",
            "--json",
            "--nil-to-undefined",
            "--destination",
            "color/color.go",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Emit(args)) => {
                assert_eq!(args.type_name, "Color");
                assert_eq!(args.values, vec!["Undefined", "Red", "Green"]);
                assert_eq!(args.undefined.as_deref(), Some("Undefined"));
                assert!(args.json && args.nil_to_undefined);
                assert_eq!(args.destination, PathBuf::from("color/color.go"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_emit_nil_to_undefined_requires_json() {
        let result = Cli::try_parse_from([
            "enumerator",
            "emit",
            "--type",
            "Color",
            "--package",
            "color",
            "--values",
            "Red",
            "--nil-to-undefined",
            "--destination",
            "color.go",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_emit_requires_values() {
        let result = Cli::try_parse_from([
            "enumerator",
            "emit",
            "--type",
            "Color",
            "--package",
            "color",
            "--destination",
            "color.go",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inspect_format() {
        let cli = Cli::try_parse_from(["enumerator", "inspect", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Inspect(args)) => assert_eq!(args.format, InspectFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
