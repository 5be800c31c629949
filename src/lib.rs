//! `bioenv`: per-project virtual environments for bioinformatics command-line tools.
//!
//! An environment is a directory holding a `bioenv.json` manifest and a `tools/`
//! directory. Tools are installed by narrowing a sparse checkout of a shared
//! registry repository down to a single `tools/<name>` subtree.

/// Command-line surface: clap parser, verb dispatcher and per-verb handlers.
pub mod cli;
/// Process settings read from `BIOENV_*` environment variables.
pub mod config;
/// File names, defaults and environment variable keys.
pub mod constants;
/// Environment lifecycle, manifest storage, tool install and launch.
pub mod core;
/// The `bioenv.json` data model.
pub mod models;
/// Process, version-control and shell-prompt plumbing.
pub mod system;
