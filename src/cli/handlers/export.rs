// src/cli/handlers/export.rs

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::commons;
use crate::{config::Settings, core::manifest_store};

/// The main handler for the `export` command.
/// Prints the manifest as JSON, or writes it to `[file]` when one is given.
pub fn handle(args: Vec<String>, settings: &Settings) -> Result<()> {
    let env = commons::open_environment(settings)?;

    match args.as_slice() {
        [] => {
            let json = serde_json::to_string_pretty(env.manifest())
                .context("Could not serialize the manifest.")?;
            println!("{}", json);
        }
        [destination] => {
            let destination = Path::new(destination);
            manifest_store::save(destination, env.manifest()).with_context(|| {
                format!("Could not export manifest to '{}'.", destination.display())
            })?;
            println!(
                "Exported environment '{}' to {}",
                env.name().yellow(),
                destination.display()
            );
        }
        _ => return Err(commons::usage("Usage: bioenv export [file]")),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::core::environment::VirtualEnvironment;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_export_to_file_matches_manifest() {
        let temp = TempDir::new().unwrap();
        let env = VirtualEnvironment::init(temp.path(), "exported").unwrap();
        let settings = Settings {
            env_dir: temp.path().to_path_buf(),
            registry: RegistryConfig::default(),
            vcs_program: "git".to_string(),
        };
        let destination = temp.path().join("copy.json");

        handle(vec![destination.to_string_lossy().to_string()], &settings).unwrap();

        let exported = manifest_store::load(&destination).unwrap();
        assert_eq!(&exported, env.manifest());
    }

    #[test]
    #[serial]
    fn test_export_rejects_extra_arguments() {
        let temp = TempDir::new().unwrap();
        VirtualEnvironment::init(temp.path(), "exported").unwrap();
        let settings = Settings {
            env_dir: temp.path().to_path_buf(),
            registry: RegistryConfig::default(),
            vcs_program: "git".to_string(),
        };

        let result = handle(vec!["a.json".to_string(), "b.json".to_string()], &settings);

        assert!(result.is_err());
        assert!(!temp.path().join("a.json").exists());
    }
}
