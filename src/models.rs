// src/models.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::UNKNOWN_TOOL_VERSION;

// --- PERSISTED MODELS (bioenv.json) ---
// Field names are part of the on-disk format. Other programs read this file,
// so renames here are breaking changes.

/// A tool installed into an environment.
///
/// Records are append-only: once written to the manifest they are never edited.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// The tool's name, as used in the registry (`tools/<name>`).
    pub name: String,
    /// Free-form version string.
    pub version: String,
    /// Human-navigable link to the tool's subtree in the registry.
    #[serde(rename = "repoLink")]
    pub repo_link: String,
    /// Where the tool's files were materialized on this machine.
    pub path: PathBuf,
}

impl Tool {
    /// Creates a record for a freshly fetched tool whose version is not known yet.
    pub fn unversioned(name: &str, repo_link: String, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            version: UNKNOWN_TOOL_VERSION.to_string(),
            repo_link,
            path,
        }
    }
}

/// The persisted state of one environment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// The environment's display name.
    #[serde(rename = "envName")]
    pub env_name: String,
    /// Host architecture the environment was created on.
    pub arch: String,
    /// Host operating system the environment was created on.
    pub os: String,
    /// Absolute path of the environment's root directory.
    #[serde(rename = "workingDirectory")]
    pub working_directory: PathBuf,
    /// Installed tools, in install order. Names may repeat.
    pub tools: Vec<Tool>,
}

impl Manifest {
    /// Creates an empty manifest for the current host.
    pub fn new_for_host(env_name: &str, working_directory: &Path) -> Self {
        Self {
            env_name: env_name.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            os: std::env::consts::OS.to_string(),
            working_directory: working_directory.to_path_buf(),
            tools: Vec::new(),
        }
    }

    /// Returns the most recently installed record with the given name.
    pub fn find_tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().rev().find(|tool| tool.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_serializes_with_wire_field_names() {
        let mut manifest = Manifest::new_for_host("myenv", Path::new("/work/env"));
        manifest.tools.push(Tool::unversioned(
            "gatk",
            "https://example.org/tree/master/tools/gatk".to_string(),
            PathBuf::from("/work/env/tools/gatk"),
        ));

        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["envName"], "myenv");
        assert_eq!(value["workingDirectory"], "/work/env");
        assert_eq!(value["arch"], std::env::consts::ARCH);
        assert_eq!(value["os"], std::env::consts::OS);
        assert_eq!(value["tools"][0]["name"], "gatk");
        assert_eq!(value["tools"][0]["version"], "0");
        assert_eq!(
            value["tools"][0]["repoLink"],
            "https://example.org/tree/master/tools/gatk"
        );
        assert_eq!(value["tools"][0]["path"], "/work/env/tools/gatk");
    }

    #[test]
    fn test_find_tool_prefers_latest_record() {
        let mut manifest = Manifest::new_for_host("env", Path::new("/env"));
        manifest.tools.push(Tool {
            name: "samtools".to_string(),
            version: "1.0".to_string(),
            repo_link: String::new(),
            path: PathBuf::from("/old"),
        });
        manifest.tools.push(Tool {
            name: "samtools".to_string(),
            version: "1.1".to_string(),
            repo_link: String::new(),
            path: PathBuf::from("/new"),
        });

        let found = manifest.find_tool("samtools").unwrap();
        assert_eq!(found.version, "1.1");
        assert!(manifest.find_tool("bwa").is_none());
    }
}
