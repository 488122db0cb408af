mod cli;
mod config;
mod display;
mod error;
mod hal;
mod media;
mod metadata;
mod player;
mod playlist;
mod runtime;
mod session;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::error::JukeError;

fn main() -> ExitCode {
    // Logs go to stderr; the terminal panel owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ JukeError::Config(_)) => {
            eprintln!("lcdjuke: {e}");
            eprint!("{}", cli::USAGE);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("lcdjuke: {e}");
            ExitCode::FAILURE
        }
    }
}
