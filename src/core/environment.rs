// src/core/environment.rs

use crate::constants::{MANIFEST_FILENAME, TOOLS_DIR};
use crate::core::manifest_store::{self, ManifestError};
use crate::models::{Manifest, Tool};
use crate::system::prompt;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur while creating, opening or using an environment.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// The directory to create or open the environment in does not exist.
    #[error("Directory '{}' does not exist.", path.display())]
    DirectoryNotFound {
        /// The directory as resolved to an absolute path.
        path: PathBuf,
    },
    /// The environment name is unusable.
    #[error("Invalid environment name '{0}': it must not be empty.")]
    InvalidName(String),
    /// The environment has been torn down with `quit`.
    #[error("Environment '{name}' is stopped; no further commands can run against it.")]
    Stopped {
        /// The environment's name.
        name: String,
    },
    /// A filesystem I/O error occurred while resolving the directory.
    #[error("Filesystem error on '{}': {source}", path.display())]
    Io {
        /// The path being resolved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Reading or writing the manifest failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// A live handle on one environment.
///
/// The handle owns its in-memory manifest. It is created by [`VirtualEnvironment::init`]
/// or [`VirtualEnvironment::open`] and handed by reference to whatever needs it;
/// there is no process-global instance.
#[derive(Debug)]
pub struct VirtualEnvironment {
    manifest_path: PathBuf,
    manifest: Manifest,
    is_active: bool,
    stopped: bool,
}

impl VirtualEnvironment {
    /// Creates a new environment rooted at `dir`.
    ///
    /// Writes a fresh `bioenv.json` (replacing any existing one, without merging)
    /// and sets the shell prompt variable (`PS1`, or `PROMPT` on Windows) of this
    /// process to `name`.
    ///
    /// # Errors
    /// `EnvironmentError::DirectoryNotFound` if `dir` does not exist, in which case
    /// nothing is written.
    pub fn init(dir: &Path, name: &str) -> EnvironmentResult<Self> {
        validate_env_name(name)?;
        let working_directory = resolve_directory(dir)?;
        log::debug!("Working directory resolved to '{}'", working_directory.display());

        let manifest = Manifest::new_for_host(name, &working_directory);
        let manifest_path = working_directory.join(MANIFEST_FILENAME);

        log::info!("Creating environment manifest '{}'", manifest_path.display());
        manifest_store::save(&manifest_path, &manifest)?;

        prompt::set_prompt_hint(&manifest.env_name);

        Ok(Self {
            manifest_path,
            manifest,
            is_active: true,
            stopped: false,
        })
    }

    /// Opens the existing environment rooted at `dir` by loading its manifest.
    ///
    /// # Errors
    /// `EnvironmentError::DirectoryNotFound` if `dir` does not exist, and
    /// `ManifestError::NotFound` if it holds no `bioenv.json`.
    pub fn open(dir: &Path) -> EnvironmentResult<Self> {
        let working_directory = resolve_directory(dir)?;
        let manifest_path = working_directory.join(MANIFEST_FILENAME);
        let manifest = manifest_store::load(&manifest_path)?;

        if manifest.working_directory != working_directory {
            log::warn!(
                "Manifest '{}' records working directory '{}'; it has probably been moved.",
                manifest_path.display(),
                manifest.working_directory.display()
            );
        }

        Ok(Self {
            manifest_path,
            manifest,
            is_active: true,
            stopped: false,
        })
    }

    /// The in-memory manifest, as of the last load or write by this handle.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// `<workingDirectory>/bioenv.json`. Fixed for the lifetime of the handle.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// The environment's root directory.
    pub fn working_directory(&self) -> &Path {
        self.manifest_path
            .parent()
            .unwrap_or(self.manifest.working_directory.as_path())
    }

    /// Where tool checkouts live.
    pub fn tools_dir(&self) -> PathBuf {
        self.working_directory().join(TOOLS_DIR)
    }

    /// The environment's name.
    pub fn name(&self) -> &str {
        &self.manifest.env_name
    }

    /// Whether commands may be dispatched against this environment.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the environment has been torn down.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Fails if the environment has been stopped.
    pub fn ensure_running(&self) -> EnvironmentResult<()> {
        if self.stopped || !self.is_active {
            return Err(EnvironmentError::Stopped {
                name: self.manifest.env_name.clone(),
            });
        }
        Ok(())
    }

    /// Tears the environment down for the rest of this process.
    ///
    /// The flags are not persisted; the manifest on disk is left untouched.
    pub fn quit(&mut self) {
        log::info!("Stopping environment '{}'", self.manifest.env_name);
        self.is_active = false;
        self.stopped = true;
    }

    /// Commits `tool` to the manifest on disk and refreshes the in-memory copy.
    pub(crate) fn record_tool(&mut self, tool: Tool) -> EnvironmentResult<()> {
        self.ensure_running()?;
        self.manifest = manifest_store::append_tool(&self.manifest_path, tool)?;
        Ok(())
    }
}

/// Turns `dir` into an absolute path of an existing directory.
fn resolve_directory(dir: &Path) -> EnvironmentResult<PathBuf> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| EnvironmentError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?
            .join(dir)
    };

    if !absolute.is_dir() {
        return Err(EnvironmentError::DirectoryNotFound { path: absolute });
    }

    // `dunce` keeps Windows paths free of the `\\?\` prefix.
    dunce::canonicalize(&absolute).map_err(|e| EnvironmentError::Io {
        path: absolute,
        source: e,
    })
}

/// The name is stored exactly as given; it only has to hold something other than whitespace.
fn validate_env_name(name: &str) -> EnvironmentResult<()> {
    if name.trim().is_empty() || name.contains('\0') {
        return Err(EnvironmentError::InvalidName(name.to_string()));
    }
    Ok(())
}
