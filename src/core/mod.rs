// src/core/mod.rs

/// Creating, opening and stopping an environment.
pub mod environment;
/// Fetching a tool from the registry and recording it.
pub mod installer;
/// Running an installed tool.
pub mod launcher;
/// Loading, saving and appending to the manifest file.
pub mod manifest_store;
/// Prefix matching of verbs and argument-count checks.
pub mod verb_resolver;
