// src/system/executor.rs

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Errors raised while running an external program.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The program name was empty.
    #[error("No command specified to run.")]
    EmptyCommand,
    /// The program could not be started (e.g. not found on `PATH`).
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    /// The program ran but reported failure.
    #[error("Command '{command}' exited with {}.", describe_code(.code))]
    NonZeroExitStatus {
        /// The rendered command line.
        command: String,
        /// `None` when the process was terminated by a signal.
        code: Option<i32>,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by a signal)".to_string(),
    }
}

/// Runs `program` with `args` and waits for it to finish.
///
/// Stdout and stderr are inherited, so the operator sees the tool's own output as
/// it happens; nothing is captured or parsed. There is no timeout and no
/// cancellation: the call returns when the child exits.
///
/// # Arguments
/// * `program` - The executable to run. Looked up on `PATH` (the child's, if `env_vars` sets one).
/// * `args` - Arguments passed verbatim, without shell interpretation.
/// * `cwd` - The working directory for the child, or `None` to inherit ours.
/// * `env_vars` - Extra environment variables layered over the inherited environment.
pub fn execute_command(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    env_vars: &HashMap<String, OsString>,
) -> Result<(), ExecutionError> {
    if program.trim().is_empty() {
        return Err(ExecutionError::EmptyCommand);
    }

    let display = render_command_line(program, args);
    log::debug!(
        "Executing: {} (cwd: {})",
        display,
        cwd.map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );

    let mut command = StdCommand::new(program);
    command
        .args(args)
        .envs(env_vars)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        command.current_dir(dunce::simplified(dir));
    }

    let status = command
        .status()
        .map_err(|e| ExecutionError::CommandFailed(display.clone(), e))?;

    if !status.success() {
        return Err(ExecutionError::NonZeroExitStatus {
            command: display,
            code: status.code(),
        });
    }
    Ok(())
}

/// Renders a command line the way a user would type it, for logs and error messages.
pub fn render_command_line(program: &str, args: &[String]) -> String {
    let parts = std::iter::once(program).chain(args.iter().map(String::as_str));
    shlex::try_join(parts).unwrap_or_else(|_| {
        let mut joined = program.to_string();
        for arg in args {
            joined.push(' ');
            joined.push_str(arg);
        }
        joined
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_render_command_line_quotes_when_needed() {
        let args = vec![
            "sparse-checkout".to_string(),
            "set".to_string(),
            "tools/my tool".to_string(),
        ];
        let rendered = render_command_line("git", &args);

        assert!(rendered.starts_with("git sparse-checkout set "));
        assert_ne!(rendered, "git sparse-checkout set tools/my tool");
        let reparsed = shlex::split(&rendered).unwrap();
        assert_eq!(reparsed, vec!["git", "sparse-checkout", "set", "tools/my tool"]);
    }

    #[test]
    fn test_empty_program_is_rejected() {
        let result = execute_command("  ", &[], None, &HashMap::new());
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    #[serial]
    fn test_missing_program_fails_to_spawn() {
        let result = execute_command(
            "bioenv-definitely-not-a-real-program",
            &[],
            None,
            &HashMap::new(),
        );
        assert!(matches!(result, Err(ExecutionError::CommandFailed(..))));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_exit_status_is_reported() {
        let no_env = HashMap::new();
        let ok = execute_command("sh", &["-c".to_string(), "exit 0".to_string()], None, &no_env);
        assert!(ok.is_ok());

        let failed = execute_command("sh", &["-c".to_string(), "exit 3".to_string()], None, &no_env);
        match failed {
            Err(ExecutionError::NonZeroExitStatus { code, .. }) => assert_eq!(code, Some(3)),
            other => panic!("expected NonZeroExitStatus, got {:?}", other),
        }
    }
}
