// src/bin/bioenv.rs

use anyhow::Result;
use bioenv::{
    cli::{Cli, dispatcher},
    config::Settings,
    core::verb_resolver::UsageError,
};
use clap::Parser;
use colored::*;

/// Exit status for command-line misuse, matching clap's own.
const USAGE_EXIT_CODE: i32 = 2;

/// The main entry point of the `bioenv` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // --- Centralized Error Handling ---
        eprintln!("{}: {:#}", "Error".red().bold(), e);

        if e.downcast_ref::<UsageError>().is_some() {
            eprintln!("Run `bioenv --help` for usage.");
            std::process::exit(USAGE_EXIT_CODE);
        }
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    let settings = Settings::from_env()?;
    dispatcher::dispatch(cli.into_args(), &settings)
}
