// src/cli/handlers/commons.rs

// Shared helpers for the handlers that act on an existing environment.

use anyhow::{Context, Result};

use crate::{config::Settings, core::environment::VirtualEnvironment, core::verb_resolver::UsageError};

/// Opens the environment selected by `BIOENV_DIR` or the current directory.
pub fn open_environment(settings: &Settings) -> Result<VirtualEnvironment> {
    VirtualEnvironment::open(&settings.env_dir).with_context(|| {
        format!(
            "Could not open a bioenv environment in '{}'.",
            settings.env_dir.display()
        )
    })
}

/// Builds the usage error a handler returns when its arguments don't fit.
pub fn usage(message: &str) -> anyhow::Error {
    UsageError::InvalidArguments(message.to_string()).into()
}
