// src/core/installer.rs

use crate::config::RegistryConfig;
use crate::core::environment::{EnvironmentError, VirtualEnvironment};
use crate::models::Tool;
use crate::system::executor::ExecutionError;
use crate::system::vcs::VersionControl;

use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// The external steps of an install, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    /// Filtered, sparse-enabled clone of the registry.
    Clone,
    /// `sparse-checkout init --cone`.
    SparseCheckoutInit,
    /// `sparse-checkout set tools/<name>`.
    SparseCheckoutSet,
}

impl fmt::Display for FetchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Clone => "clone",
            Self::SparseCheckoutInit => "sparse-checkout init",
            Self::SparseCheckoutSet => "sparse-checkout set",
        };
        f.write_str(label)
    }
}

/// Represents errors that can occur while installing a tool.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The tool name cannot be used as a registry subpath and directory name.
    #[error(
        "Invalid tool name '{0}': it must be non-empty and contain no path separators, '..' or whitespace."
    )]
    InvalidToolName(String),
    /// The version-control client failed. Nothing was recorded in the manifest.
    #[error("Fetching tool '{tool}' failed at step '{step}': {source}")]
    FetchFailed {
        /// The tool being installed.
        tool: String,
        /// The step that failed.
        step: FetchStep,
        /// The underlying process failure.
        #[source]
        source: ExecutionError,
    },
    /// The local tools directory could not be created.
    #[error("Could not create tools directory '{}': {source}", path.display())]
    ToolsDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The environment refused the operation, or the manifest commit failed.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// Installs tools into an environment by narrowing a sparse checkout of the registry.
///
/// The sequence is linear and never retried:
/// 1. clone the registry into `<workingDirectory>/tools/<name>` (skipped when a
///    checkout is already there),
/// 2. enable cone-mode sparse checkout,
/// 3. narrow it to `tools/<name>`,
/// 4. append a [`Tool`] record to the manifest.
///
/// A failure in steps 1-3 leaves the manifest untouched. A failure in step 4
/// leaves the fetched files on disk; they are not rolled back, and running the
/// install again reuses them.
#[derive(Debug)]
pub struct ToolInstaller<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    registry: &'a RegistryConfig,
}

impl<'a, V: VersionControl + ?Sized> ToolInstaller<'a, V> {
    /// Creates an installer fetching from `registry` through `vcs`.
    pub fn new(vcs: &'a V, registry: &'a RegistryConfig) -> Self {
        Self { vcs, registry }
    }

    /// Fetches `tool_name` and records it in `env`'s manifest.
    ///
    /// Installing a tool that is already recorded appends a second record.
    ///
    /// # Returns
    /// The record that was committed.
    pub fn install(
        &self,
        env: &mut VirtualEnvironment,
        tool_name: &str,
    ) -> Result<Tool, InstallError> {
        env.ensure_running()?;
        validate_tool_name(tool_name)?;

        // 1. Resolve the target.
        let clone_url = self.registry.clone_url();
        let subpath = self.registry.tool_subpath(tool_name);
        let tools_dir = env.tools_dir();
        let checkout_dir = tools_dir.join(tool_name);
        log::info!(
            "Installing '{}' from {} ({}) into '{}'",
            tool_name,
            clone_url,
            subpath,
            checkout_dir.display()
        );

        fs::create_dir_all(&tools_dir).map_err(|e| InstallError::ToolsDir {
            path: tools_dir.clone(),
            source: e,
        })?;

        let fetch_failed = |step: FetchStep| {
            move |source: ExecutionError| InstallError::FetchFailed {
                tool: tool_name.to_string(),
                step,
                source,
            }
        };

        // 2. Clone (filtered, sparse).
        if checkout_dir.join(".git").exists() {
            log::info!(
                "Reusing existing checkout at '{}'",
                checkout_dir.display()
            );
        } else {
            self.vcs
                .sparse_clone(&clone_url, &checkout_dir)
                .map_err(fetch_failed(FetchStep::Clone))?;
        }

        // 3. Enable cone-mode sparse checkout.
        self.vcs
            .sparse_checkout_init(&checkout_dir)
            .map_err(fetch_failed(FetchStep::SparseCheckoutInit))?;

        // 4. Narrow to the tool's subtree.
        self.vcs
            .sparse_checkout_set(&checkout_dir, &subpath)
            .map_err(fetch_failed(FetchStep::SparseCheckoutSet))?;

        // 5. Build the record and commit it.
        let tool = Tool::unversioned(tool_name, self.registry.tool_link(tool_name), checkout_dir);
        env.record_tool(tool.clone())?;
        log::info!(
            "Recorded '{}' in '{}'",
            tool.name,
            env.manifest_path().display()
        );

        Ok(tool)
    }
}

/// Tool names become a registry subpath and a local directory name.
fn validate_tool_name(name: &str) -> Result<(), InstallError> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains(['/', '\\', '\0'])
        || name.chars().any(char::is_whitespace);

    if invalid {
        return Err(InstallError::InvalidToolName(name.to_string()));
    }
    Ok(())
}
