// src/core/launcher.rs

use crate::constants::REGISTRY_TOOLS_SUBDIR;
use crate::core::environment::{EnvironmentError, VirtualEnvironment};
use crate::models::Tool;
use crate::system::executor::{self, ExecutionError};

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur while calling an installed tool.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// No record with this name exists in the manifest.
    #[error("Tool '{name}' is not installed in environment '{env_name}'. Run `bioenv install {name}` first.")]
    ToolNotInstalled {
        /// The requested tool.
        name: String,
        /// The environment that was searched.
        env_name: String,
    },
    /// The tool's directories could not be put on `PATH`.
    #[error("Could not build PATH for tool '{name}': {source}")]
    InvalidPath {
        /// The requested tool.
        name: String,
        /// The underlying error.
        #[source]
        source: env::JoinPathsError,
    },
    /// The tool could not be started, or it exited unsuccessfully.
    #[error("Tool '{name}' failed: {source}")]
    ToolFailed {
        /// The requested tool.
        name: String,
        /// The underlying process failure.
        #[source]
        source: ExecutionError,
    },
    /// The environment refused the operation.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// Runs the installed tool `name` with `args`, in the foreground.
///
/// The child inherits this process's environment and stdio; its `PATH` is
/// prefixed with the tool's directories (see [`tool_search_dirs`]) so the
/// tool's own executables win over anything else on the system.
pub fn call_tool(
    env: &VirtualEnvironment,
    name: &str,
    args: &[String],
) -> Result<(), LaunchError> {
    env.ensure_running()?;

    let tool = env
        .manifest()
        .find_tool(name)
        .ok_or_else(|| LaunchError::ToolNotInstalled {
            name: name.to_string(),
            env_name: env.name().to_string(),
        })?;

    let path = tool_path_variable(tool).map_err(|e| LaunchError::InvalidPath {
        name: name.to_string(),
        source: e,
    })?;
    let mut env_vars = HashMap::new();
    env_vars.insert("PATH".to_string(), path);

    log::info!("Calling '{}' (installed at '{}')", name, tool.path.display());
    executor::execute_command(&tool.name, args, None, &env_vars).map_err(|e| {
        LaunchError::ToolFailed {
            name: name.to_string(),
            source: e,
        }
    })
}

/// The directories searched for a tool's executables, most specific first.
pub fn tool_search_dirs(tool: &Tool) -> Vec<PathBuf> {
    let subtree = tool.path.join(REGISTRY_TOOLS_SUBDIR).join(&tool.name);
    vec![subtree.join("bin"), subtree, tool.path.clone()]
}

/// `PATH` with the tool's directories prepended to the inherited value.
fn tool_path_variable(tool: &Tool) -> Result<OsString, env::JoinPathsError> {
    let inherited = env::var_os("PATH").unwrap_or_default();
    let dirs = tool_search_dirs(tool)
        .into_iter()
        .chain(env::split_paths(&inherited));
    env::join_paths(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest_store;
    use serial_test::serial;
    use std::path::Path;
    use tempfile::TempDir;

    fn installed(name: &str, path: &Path) -> Tool {
        Tool::unversioned(name, String::new(), path.to_path_buf())
    }

    #[test]
    fn test_search_dirs_order() {
        let tool = installed("gatk", Path::new("/env/tools/gatk"));
        assert_eq!(
            tool_search_dirs(&tool),
            vec![
                PathBuf::from("/env/tools/gatk/tools/gatk/bin"),
                PathBuf::from("/env/tools/gatk/tools/gatk"),
                PathBuf::from("/env/tools/gatk"),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_path_variable_prepends_tool_dirs() {
        let tool = installed("gatk", Path::new("/env/tools/gatk"));
        let path = tool_path_variable(&tool).unwrap();
        let entries: Vec<PathBuf> = env::split_paths(&path).collect();
        assert_eq!(entries[0], PathBuf::from("/env/tools/gatk/tools/gatk/bin"));
        assert_eq!(entries[2], PathBuf::from("/env/tools/gatk"));
    }

    #[test]
    #[serial]
    fn test_calling_unknown_tool_fails() {
        let temp = TempDir::new().unwrap();
        let env = VirtualEnvironment::init(temp.path(), "callenv").unwrap();

        let result = call_tool(&env, "gatk", &[]);

        match result {
            Err(LaunchError::ToolNotInstalled { name, env_name }) => {
                assert_eq!(name, "gatk");
                assert_eq!(env_name, "callenv");
            }
            other => panic!("expected ToolNotInstalled, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_calling_on_stopped_environment_fails() {
        let temp = TempDir::new().unwrap();
        let mut env = VirtualEnvironment::init(temp.path(), "callenv").unwrap();
        env.quit();

        let result = call_tool(&env, "gatk", &[]);

        assert!(matches!(
            result,
            Err(LaunchError::Environment(EnvironmentError::Stopped { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_call_runs_executable_from_tool_bin_dir() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        VirtualEnvironment::init(temp.path(), "callenv").unwrap();

        let checkout = temp.path().join("tools").join("hello");
        let bin = checkout.join("tools").join("hello").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let marker = temp.path().join("called.txt");
        let script = bin.join("hello");
        std::fs::write(
            &script,
            format!("#!/bin/sh\nprintf '%s\\n' \"$*\" > '{}'\n", marker.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let manifest_path = temp.path().join("bioenv.json");
        manifest_store::append_tool(&manifest_path, installed("hello", &checkout)).unwrap();
        let env = VirtualEnvironment::open(temp.path()).unwrap();

        call_tool(&env, "hello", &["--in".to_string(), "reads.bam".to_string()]).unwrap();

        let written = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(written.trim(), "--in reads.bam");
    }
}
