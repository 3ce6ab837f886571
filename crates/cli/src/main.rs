//! Storefront cart command-line front end

use std::{io, process};

use tracing::error;

use crate::config::CliConfig;

mod commands;
mod config;
mod observability;
mod orders;

/// Storefront cart entry point
pub fn main() {
    // Load configuration from .env and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(init_error) = observability::init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for init errors"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let mut stdout = io::stdout().lock();

    if let Err(command_error) = commands::run(&config, &mut stdout) {
        error!("{command_error}");

        #[expect(
            clippy::print_stderr,
            reason = "command failures are reported to the user on stderr"
        )]
        {
            eprintln!("error: {command_error}");
        }

        process::exit(1);
    }
}
