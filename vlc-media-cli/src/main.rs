//! vlc-media CLI
//!
//! Command-line interface over the playback progress store, called from the
//! VLC helper shell scripts. Results go to stdout; diagnostics go to stderr
//! through the logger.

mod cli_types;
mod commands;
mod config;
mod error;
mod output;

use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use cli_types::Cli;
use commands::Status;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(e),
    };
    init_logging(cli.verbose);

    let db_path = config::resolve_db_path(cli.db);
    log::debug!("Using database {}", db_path.display());

    let reports_status = cli.command.reports_status();
    let mut stdout = std::io::stdout().lock();

    match commands::run(cli.command, &db_path, &mut stdout) {
        Ok(Status::Done) => ExitCode::SUCCESS,
        Ok(Status::NotFound) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            if reports_status {
                let _ = writeln!(stdout, "ERROR");
            }
            ExitCode::FAILURE
        }
    }
}

/// Set up `env_logger` on stderr. `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .format_timestamp(None)
            .format_target(false)
            .init();
    }
}

/// Report a bad invocation: error on stderr, usage on stdout, exit 1.
fn usage_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = Cli::command().print_help();
            ExitCode::FAILURE
        }
        _ => {
            let _ = err.print();
            let _ = Cli::command().print_help();
            ExitCode::FAILURE
        }
    }
}
