//! Thin binary entry point — parses CLI args, delegates to `gist_vimrc::run()`,
//! and maps failures to the tool's exit codes.

use std::process::ExitCode;

use clap::Parser;

use gist_vimrc::error::SyncError;

const EXIT_STALE_TOKEN: u8 = 1;
const EXIT_UNKNOWN_ERROR: u8 = 2;
const EXIT_NO_GIST_TO_PULL: u8 = 3;

fn main() -> ExitCode {
    let cli = gist_vimrc::cli::Cli::parse();

    match gist_vimrc::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            // Exit code by error kind, not by handler order.
            match e.downcast_ref::<SyncError>() {
                Some(SyncError::TokenDiscovery(_)) => ExitCode::from(EXIT_STALE_TOKEN),
                Some(SyncError::NoGistToPull(_)) => ExitCode::from(EXIT_NO_GIST_TO_PULL),
                None => ExitCode::from(EXIT_UNKNOWN_ERROR),
            }
        }
    }
}
