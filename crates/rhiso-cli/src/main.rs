use clap::Parser;
use rhiso_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Log file first; stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = cli.run() {
        tracing::error!("{:#}", err);
        cli::report_error(&err, json);
        std::process::exit(1);
    }
}
