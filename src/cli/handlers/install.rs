// src/cli/handlers/install.rs

use anyhow::{Context, Result};
use colored::Colorize;

use super::commons;
use crate::{config::Settings, core::installer::ToolInstaller, system::vcs::GitCli};

/// The main handler for the `install` command.
/// Fetches `<tool>` from the registry and records it in the environment's manifest.
pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let [tool_name] = args.as_slice() else {
        return Err(commons::usage("Usage: bioenv install <tool>"));
    };

    let mut env = commons::open_environment(settings)?;
    println!(
        "Installing '{}' into environment '{}' from {}",
        tool_name.cyan(),
        env.name().yellow(),
        settings.registry.url
    );

    let vcs = GitCli::new(settings.vcs_program.clone());
    let tool = ToolInstaller::new(&vcs, &settings.registry)
        .install(&mut env, tool_name)
        .with_context(|| format!("Could not install tool '{}'.", tool_name))?;

    println!("\n{}", "Success!".green().bold());
    println!("  Tool: {} (version {})", tool.name, tool.version);
    println!("  Files: {}", tool.path.display());
    println!("  Registry: {}", tool.repo_link.dimmed());

    Ok(())
}
