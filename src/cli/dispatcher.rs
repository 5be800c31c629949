use anyhow::{Result, anyhow};

use crate::{
    cli::handlers,
    config::Settings,
    core::verb_resolver::{self, UsageError},
};

/// Defines a command and its handler.
struct CommandDefinition {
    name: &'static str,
    handler: fn(Vec<String>, &Settings) -> Result<()>,
}

/// The single source of truth for what each verb does.
/// Names here must match `verb_resolver::VERBS`.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "init",
        handler: handlers::init::handle,
    },
    CommandDefinition {
        name: "install",
        handler: handlers::install::handle,
    },
    CommandDefinition {
        name: "call",
        handler: handlers::call::handle,
    },
    CommandDefinition {
        name: "export",
        handler: handlers::export::handle,
    },
    CommandDefinition {
        name: "quit",
        handler: handlers::quit::handle,
    },
];

/// Finds a command definition in the registry by its canonical name.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY.iter().find(|cmd| cmd.name == name)
}

/// Resolves the verb in `all_args[0]`, checks the argument count and runs the handler.
///
/// `all_args` includes the verb itself; handlers receive only what follows it.
///
/// # Errors
/// A `UsageError` (reachable through `anyhow::Error::downcast_ref`) for an
/// unknown or ambiguous verb or a wrong argument count. Nothing has run in
/// that case.
pub fn dispatch(all_args: Vec<String>, settings: &Settings) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((verb, rest)) = all_args.split_first() else {
        return Err(UsageError::InvalidArguments("No command given.".to_string()).into());
    };

    // 1. Prefix match to exactly one verb.
    let command = verb_resolver::resolve_command(verb)?;
    if command != verb.as_str() {
        log::debug!("Expanded '{}' to '{}'", verb, command);
    }

    // 2. Arity, counting the verb.
    verb_resolver::validate_arity(command, all_args.len())?;

    // 3. Dispatch to handler.
    let definition = find_command(command)
        .ok_or_else(|| anyhow!("Internal error: no handler registered for '{}'.", command))?;
    (definition.handler)(rest.to_vec(), settings)
}
