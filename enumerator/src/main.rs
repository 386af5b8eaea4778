use clap::Parser;
use enumerator::cli::Cli;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    enumerator::init_tracing(cli.verbose, cli.quiet);

    match enumerator::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
