// src/config.rs

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::{
    DEFAULT_REGISTRY_BRANCH, DEFAULT_REGISTRY_URL, DEFAULT_VCS_PROGRAM, ENV_DIR_VAR,
    ENV_REGISTRY_BRANCH_VAR, ENV_REGISTRY_URL_VAR, ENV_VCS_PROGRAM_VAR, REGISTRY_TOOLS_SUBDIR,
};

/// Errors raised while collecting settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The working directory of the process is unreadable.
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Where tools are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL of the registry repository, without the `.git` suffix.
    pub url: String,
    /// Branch used for human-navigable links.
    pub branch: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            branch: DEFAULT_REGISTRY_BRANCH.to_string(),
        }
    }
}

impl RegistryConfig {
    /// The URL handed to the version-control client.
    pub fn clone_url(&self) -> String {
        format!("{}.git", self.url.trim_end_matches('/'))
    }

    /// The path of a tool's subtree inside the registry repository.
    pub fn tool_subpath(&self, tool_name: &str) -> String {
        format!("{}/{}", REGISTRY_TOOLS_SUBDIR, tool_name)
    }

    /// A link a person can open in a browser to look at the tool's files.
    pub fn tool_link(&self, tool_name: &str) -> String {
        format!(
            "{}/tree/{}/{}",
            self.url.trim_end_matches('/'),
            self.branch,
            self.tool_subpath(tool_name)
        )
    }
}

/// Process-level settings, read once from the environment and passed to handlers.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The environment directory that `install`, `call`, `export` and `quit` act on.
    pub env_dir: PathBuf,
    /// The shared tool registry.
    pub registry: RegistryConfig,
    /// The version-control client program.
    pub vcs_program: String,
}

impl Settings {
    /// Builds settings from `BIOENV_*` variables, falling back to built-in defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_dir = match non_empty_var(ENV_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().map_err(ConfigError::CurrentDir)?,
        };

        let defaults = RegistryConfig::default();
        let registry = RegistryConfig {
            url: non_empty_var(ENV_REGISTRY_URL_VAR).unwrap_or(defaults.url),
            branch: non_empty_var(ENV_REGISTRY_BRANCH_VAR).unwrap_or(defaults.branch),
        };

        let vcs_program =
            non_empty_var(ENV_VCS_PROGRAM_VAR).unwrap_or_else(|| DEFAULT_VCS_PROGRAM.to_string());

        log::debug!(
            "Settings: env_dir={}, registry={}, branch={}, vcs={}",
            env_dir.display(),
            registry.url,
            registry.branch,
            vcs_program
        );

        Ok(Self {
            env_dir,
            registry,
            vcs_program,
        })
    }
}

/// Reads a variable, treating unset, empty and non-UTF-8 values alike.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_urls_for_tool() {
        let registry = RegistryConfig {
            url: "https://github.com/example/registry/".to_string(),
            branch: "main".to_string(),
        };

        assert_eq!(registry.clone_url(), "https://github.com/example/registry.git");
        assert_eq!(registry.tool_subpath("gatk"), "tools/gatk");
        assert_eq!(
            registry.tool_link("gatk"),
            "https://github.com/example/registry/tree/main/tools/gatk"
        );
    }

    #[test]
    fn test_default_registry() {
        let registry = RegistryConfig::default();
        assert_eq!(registry.clone_url(), "https://github.com/propenster/bioenv.git");
        assert_eq!(registry.branch, "master");
    }
}
