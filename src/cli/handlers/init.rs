// src/cli/handlers/init.rs

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::commons;
use crate::{config::Settings, core::environment::VirtualEnvironment, system::prompt};

/// The main handler for the `init` command.
/// Creates an environment in `<directory>` named `<name>`.
pub fn handle(args: Vec<String>, _settings: &Settings) -> Result<()> {
    let [directory, name] = args.as_slice() else {
        return Err(commons::usage("Usage: bioenv init <directory> <name>"));
    };

    println!("Initializing environment '{}' in: {}", name.cyan(), directory);

    let env = VirtualEnvironment::init(Path::new(directory), name)
        .with_context(|| format!("Could not initialize environment '{}'.", name))?;

    println!("\n{}", "Success!".green().bold());
    println!("  Environment: {}", env.name());
    println!("  Working directory: {}", env.working_directory().display());
    println!("  Manifest created at: {}", env.manifest_path().display());
    log::debug!(
        "{} set to '{}' for this process",
        prompt::prompt_variable(),
        env.name()
    );

    Ok(())
}
