// src/core/manifest_store.rs

use crate::constants::MANIFEST_LOCK_FILENAME;
use crate::models::{Manifest, Tool};

use fs4::fs_std::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur while reading or writing a `bioenv.json` manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// There is no manifest at the given path.
    #[error("No manifest found at '{}'. Run `bioenv init` first.", path.display())]
    NotFound {
        /// The path that was read.
        path: PathBuf,
    },
    /// The manifest exists but is not valid `bioenv.json` content.
    #[error("Manifest '{}' is corrupt: {source}", path.display())]
    Corrupt {
        /// The path that was read.
        path: PathBuf,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
    /// A filesystem I/O error occurred while reading or writing.
    #[error("Filesystem error on '{}': {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The manifest could not be serialized.
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The manifest lock could not be acquired.
    #[error("Could not lock '{}': {source}", path.display())]
    Lock {
        /// The lock file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

type ManifestResult<T> = Result<T, ManifestError>;

/// Reads and deserializes the manifest at `path`.
///
/// # Errors
/// `ManifestError::NotFound` if the file is absent, `ManifestError::Corrupt` if it
/// is not a valid manifest, and `ManifestError::Io` for any other read failure.
pub fn load(path: &Path) -> ManifestResult<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_str(&content).map_err(|e| ManifestError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serializes `manifest` as indented JSON and replaces the file at `path`.
///
/// NOTE: The write is not transactional. A crash mid-write can leave a truncated
/// file behind, which the next `load` reports as `Corrupt`.
pub fn save(path: &Path, manifest: &Manifest) -> ManifestResult<()> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    fs::write(path, json).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!(
        "Saved manifest '{}' with {} tool(s)",
        path.display(),
        manifest.tools.len()
    );
    Ok(())
}

/// Re-reads the manifest at `path`, appends `tool`, and writes it back.
///
/// The on-disk copy is the source of truth: whatever another invocation wrote
/// since this process last looked is preserved. The whole cycle runs under an
/// exclusive lock on `.bioenv.lock` next to the manifest, so two installers
/// racing on one environment cannot drop each other's records.
///
/// Records are appended even when a tool of the same name is already present.
///
/// Returns the manifest as written.
pub fn append_tool(path: &Path, tool: Tool) -> ManifestResult<Manifest> {
    let _lock = ManifestLock::acquire(path)?;

    let mut manifest = load(path)?;
    log::debug!(
        "Appending tool '{}' to manifest '{}' ({} existing record(s))",
        tool.name,
        path.display(),
        manifest.tools.len()
    );
    manifest.tools.push(tool);
    save(path, &manifest)?;

    Ok(manifest)
}

/// An exclusive advisory lock on the environment's lock file, released on drop.
#[derive(Debug)]
struct ManifestLock {
    file: File,
    path: PathBuf,
}

impl ManifestLock {
    fn acquire(manifest_path: &Path) -> ManifestResult<Self> {
        let path = manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(MANIFEST_LOCK_FILENAME);

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| ManifestError::Lock {
                path: path.clone(),
                source: e,
            })?;

        // Blocks until any other holder releases it.
        FileExt::lock_exclusive(&file).map_err(|e| ManifestError::Lock {
            path: path.clone(),
            source: e,
        })?;
        log::debug!("Acquired manifest lock '{}'", path.display());

        Ok(Self { file, path })
    }
}

impl Drop for ManifestLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            log::warn!("Failed to release lock '{}': {}", self.path.display(), e);
        }
    }
}
