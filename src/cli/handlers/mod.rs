// src/cli/handlers/mod.rs

// One module per verb. Each exposes `handle(args, settings)`, where `args`
// excludes the verb and has already passed the arity check.

/// `bioenv call <tool> [args...]`.
pub mod call;
/// Helpers shared by the handlers.
pub mod commons;
/// `bioenv export [file]`.
pub mod export;
/// `bioenv init <directory> <name>`.
pub mod init;
/// `bioenv install <tool>`.
pub mod install;
/// `bioenv quit`.
pub mod quit;
