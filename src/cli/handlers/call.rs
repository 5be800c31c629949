// src/cli/handlers/call.rs

use anyhow::{Context, Result};

use super::commons;
use crate::{config::Settings, core::launcher};

/// The main handler for the `call` command.
/// Runs an installed tool; both `call gatk -T x` and `call gatk -- -T x` are accepted.
pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let (tool_name, tool_args) = split_call_args(&args)
        .ok_or_else(|| commons::usage("Usage: bioenv call <tool> [-- args...]"))?;

    let env = commons::open_environment(settings)?;
    launcher::call_tool(&env, tool_name, tool_args)
        .with_context(|| format!("Could not call tool '{}'.", tool_name))
}

/// Splits `[--] <tool> [--] [args...]` into the tool name and its arguments.
fn split_call_args(args: &[String]) -> Option<(&str, &[String])> {
    let args = strip_separator(args);
    let (tool_name, rest) = args.split_first()?;
    Some((tool_name.as_str(), strip_separator(rest)))
}

fn strip_separator(args: &[String]) -> &[String] {
    match args.split_first() {
        Some((first, rest)) if first == "--" => rest,
        _ => args,
    }
}
