// src/cli/handlers/quit.rs

use anyhow::Result;
use colored::Colorize;

use super::commons;
use crate::config::Settings;

/// The main handler for the `quit` command.
/// Tears down the environment for the rest of this process. The manifest is kept.
pub fn handle(_args: Vec<String>, settings: &Settings) -> Result<()> {
    let mut env = commons::open_environment(settings)?;
    env.quit();

    println!("Environment '{}' stopped.", env.name().yellow());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::constants::MANIFEST_FILENAME;
    use crate::core::environment::VirtualEnvironment;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_quit_keeps_manifest() {
        let temp = TempDir::new().unwrap();
        VirtualEnvironment::init(temp.path(), "leaving").unwrap();
        let manifest_path = temp.path().join(MANIFEST_FILENAME);
        let before = std::fs::read_to_string(&manifest_path).unwrap();
        let settings = Settings {
            env_dir: temp.path().to_path_buf(),
            registry: RegistryConfig::default(),
            vcs_program: "git".to_string(),
        };

        handle(Vec::new(), &settings).unwrap();

        assert_eq!(std::fs::read_to_string(&manifest_path).unwrap(), before);
    }
}
