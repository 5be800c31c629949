// src/system/vcs.rs

use crate::system::executor::{self, ExecutionError};
use std::collections::HashMap;
use std::path::Path;

/// The three version-control operations a tool install needs.
///
/// Every operation blocks until the client exits. Success means exit status
/// zero; anything else is a hard failure.
pub trait VersionControl {
    /// Clones `url` into `dest` without blobs and with sparse checkout enabled,
    /// so only top-level files are materialized. `dest` must not exist yet.
    fn sparse_clone(&self, url: &str, dest: &Path) -> Result<(), ExecutionError>;

    /// Switches the repository at `repo` to cone-mode sparse checkout.
    fn sparse_checkout_init(&self, repo: &Path) -> Result<(), ExecutionError>;

    /// Narrows the checkout at `repo` to the single directory `subpath`.
    fn sparse_checkout_set(&self, repo: &Path, subpath: &str) -> Result<(), ExecutionError>;
}

/// [`VersionControl`] backed by the `git` command-line client.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Uses `program` (normally `"git"`) as the client binary.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], cwd: &Path) -> Result<(), ExecutionError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        executor::execute_command(&self.program, &args, Some(cwd), &HashMap::new())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_VCS_PROGRAM)
    }
}

impl VersionControl for GitCli {
    fn sparse_clone(&self, url: &str, dest: &Path) -> Result<(), ExecutionError> {
        // Clone from inside the parent directory, naming only the last component.
        let parent = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let target = dest.file_name().unwrap_or(dest.as_os_str()).to_string_lossy();
        self.run(
            &["clone", "--filter=blob:none", "--sparse", url, &*target],
            parent,
        )
    }

    fn sparse_checkout_init(&self, repo: &Path) -> Result<(), ExecutionError> {
        self.run(&["sparse-checkout", "init", "--cone"], repo)
    }

    fn sparse_checkout_set(&self, repo: &Path, subpath: &str) -> Result<(), ExecutionError> {
        self.run(&["sparse-checkout", "set", subpath], repo)
    }
}
