// src/core/verb_resolver.rs

use thiserror::Error;

/// The fixed set of verbs `bioenv` understands, in help order.
pub const VERBS: &[&str] = &["init", "install", "call", "export", "quit"];

/// Errors in how the user invoked a command. None of them change any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// No verb starts with the given prefix.
    #[error("Unknown command '{prefix}'. Available commands: {}.", VERBS.join(", "))]
    UnknownCommand {
        /// What the user typed.
        prefix: String,
    },
    /// More than one verb starts with the given prefix.
    #[error("Ambiguous command '{prefix}': could be any of {}.", .candidates.join(", "))]
    AmbiguousCommand {
        /// What the user typed.
        prefix: String,
        /// Every verb the prefix matched.
        candidates: Vec<&'static str>,
    },
    /// The command was given the wrong number of arguments.
    #[error("Command '{command}' takes {expected} argument(s) including the command itself, received {received}.")]
    WrongArgumentCount {
        /// The canonical command name.
        command: String,
        /// The arity rule, rendered for humans.
        expected: Arity,
        /// How many arguments were supplied, including the verb.
        received: usize,
    },
    /// A handler-level argument problem (e.g. a missing tool name).
    #[error("{0}")]
    InvalidArguments(String),
}

/// How many arguments a command accepts, counting the verb itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many.
    Exactly(usize),
    /// This many or more.
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {}", n),
            Self::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Returns every verb that starts with `prefix`, in `VERBS` order.
///
/// Matching is case-sensitive. An empty prefix matches every verb.
pub fn resolve_verb(prefix: &str) -> Vec<&'static str> {
    VERBS
        .iter()
        .copied()
        .filter(|verb| verb.starts_with(prefix))
        .collect()
}

/// Resolves `prefix` to exactly one verb.
///
/// # Errors
/// `UsageError::UnknownCommand` on zero matches and `UsageError::AmbiguousCommand`
/// on more than one. Neither case is guessed at.
pub fn resolve_command(prefix: &str) -> Result<&'static str, UsageError> {
    let matches = resolve_verb(prefix);
    match matches.as_slice() {
        [] => Err(UsageError::UnknownCommand {
            prefix: prefix.to_string(),
        }),
        [single] => Ok(*single),
        _ => Err(UsageError::AmbiguousCommand {
            prefix: prefix.to_string(),
            candidates: matches,
        }),
    }
}

/// The arity rule for a canonical command, or `None` for unknown commands.
pub fn arity_for(command: &str) -> Option<Arity> {
    match command {
        "init" => Some(Arity::Exactly(3)),
        "install" => Some(Arity::Exactly(2)),
        "call" | "export" => Some(Arity::AtLeast(1)),
        "quit" => Some(Arity::Exactly(1)),
        _ => None,
    }
}

/// Checks `arg_count` (which includes the verb) against the command's arity rule.
///
/// # Errors
/// `UsageError::UnknownCommand` if `command` is not a canonical verb, and
/// `UsageError::WrongArgumentCount` if the count does not satisfy the rule.
pub fn validate_arity(command: &str, arg_count: usize) -> Result<(), UsageError> {
    let arity = arity_for(command).ok_or_else(|| UsageError::UnknownCommand {
        prefix: command.to_string(),
    })?;

    if arity.accepts(arg_count) {
        Ok(())
    } else {
        log::debug!(
            "Arity check failed for '{}': expected {}, received {}",
            command,
            arity,
            arg_count
        );
        Err(UsageError::WrongArgumentCount {
            command: command.to_string(),
            expected: arity,
            received: arg_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_verbs_resolve_to_themselves() {
        for verb in VERBS {
            assert_eq!(resolve_verb(verb), vec![*verb]);
        }
    }

    #[test]
    fn test_misspelled_verbs_do_not_match() {
        for typo in ["innit", "iinstall", "calI", "exprt", "quitt", "unknown", "Init"] {
            assert!(resolve_verb(typo).is_empty(), "'{}' should not match", typo);
        }
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(resolve_verb("ini"), vec!["init"]);
        assert_eq!(resolve_verb("ins"), vec!["install"]);
        assert_eq!(resolve_verb("in"), vec!["init", "install"]);
        assert_eq!(resolve_verb("i"), vec!["init", "install"]);
        assert_eq!(resolve_verb("e"), vec!["export"]);
        assert_eq!(resolve_verb(""), VERBS.to_vec());
    }

    #[test]
    fn test_resolve_command_outcomes() {
        assert_eq!(resolve_command("q"), Ok("quit"));
        assert_eq!(
            resolve_command("nope"),
            Err(UsageError::UnknownCommand {
                prefix: "nope".to_string()
            })
        );
        assert_eq!(
            resolve_command("in"),
            Err(UsageError::AmbiguousCommand {
                prefix: "in".to_string(),
                candidates: vec!["init", "install"],
            })
        );
    }

    #[test]
    fn test_validate_arity_table() {
        let cases = [
            ("init", 3, true),
            ("init", 2, false),
            ("init", 4, false),
            ("install", 2, true),
            ("install", 3, false),
            ("call", 1, true),
            ("call", 5, true),
            ("call", 0, false),
            ("export", 1, true),
            ("export", 0, false),
            ("quit", 1, true),
            ("quit", 2, false),
            ("unknown", 1, false),
        ];

        for (command, count, ok) in cases {
            assert_eq!(
                validate_arity(command, count).is_ok(),
                ok,
                "validate_arity({}, {})",
                command,
                count
            );
        }
    }

    #[test]
    fn test_wrong_argument_count_message() {
        let err = validate_arity("install", 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command 'install' takes exactly 2 argument(s) including the command itself, received 1."
        );
    }
}
