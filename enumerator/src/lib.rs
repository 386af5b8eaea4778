//! The `enumerator` command-line tool.

pub mod cli;
pub mod commands;

use cli::{Cli, Commands};
use enumerator_core::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("enumerator={level},enumerator_core={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Dispatches the parsed command line.
pub fn run(mut cli: Cli) -> Result<()> {
    match cli.command.take() {
        None => commands::generate::run_default(&cli),
        Some(Commands::Generate(args)) => commands::generate::run(&cli, args),
        Some(Commands::Emit(args)) => commands::emit::run(&cli, args),
        Some(Commands::Validate) => commands::validate::run(&cli),
        Some(Commands::Inspect(args)) => commands::inspect::run(&cli, args),
        Some(Commands::Init(args)) => commands::init::run(&cli, args),
    }
}
