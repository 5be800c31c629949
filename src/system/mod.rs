//! # System Interaction Layer
//!
//! This module is the boundary between the environment logic and the operating
//! system: spawning processes, talking to the version-control client, and
//! touching process-wide environment variables.
//!
//! ## Modules
//!
//! - **`executor`**: Runs an external program to completion with inherited stdio
//!   and maps its exit status to an `ExecutionError`.
//! - **`vcs`**: The `VersionControl` trait (filtered sparse clone, sparse-checkout
//!   init, sparse-checkout set) and its `git` implementation.
//! - **`prompt`**: Sets the shell prompt variable (`PS1` or `PROMPT`) to the
//!   environment's name.

/// Running external programs.
pub mod executor;
/// The shell prompt variable.
pub mod prompt;
/// The version-control seam and its `git` client.
pub mod vcs;
