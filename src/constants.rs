// src/constants.rs

/// The fixed name of an environment's manifest file, inside its working directory.
pub const MANIFEST_FILENAME: &str = "bioenv.json";

/// The advisory lock file guarding manifest read-modify-write cycles.
pub const MANIFEST_LOCK_FILENAME: &str = ".bioenv.lock";

/// The directory (inside the working directory) where tool checkouts are materialized.
pub const TOOLS_DIR: &str = "tools";

/// The directory inside the registry repository that holds one subtree per tool.
pub const REGISTRY_TOOLS_SUBDIR: &str = "tools";

/// The default shared tool registry, without the `.git` suffix.
pub const DEFAULT_REGISTRY_URL: &str = "https://github.com/propenster/bioenv";

/// The branch used when building human-navigable registry links.
pub const DEFAULT_REGISTRY_BRANCH: &str = "master";

/// The default version-control client program.
pub const DEFAULT_VCS_PROGRAM: &str = "git";

/// Version recorded for a tool until real version discovery exists.
pub const UNKNOWN_TOOL_VERSION: &str = "0";

// --- Environment variables ---

/// Overrides the environment directory used by `install`, `call`, `export` and `quit`.
pub const ENV_DIR_VAR: &str = "BIOENV_DIR";

/// Overrides the registry URL.
pub const ENV_REGISTRY_URL_VAR: &str = "BIOENV_REGISTRY_URL";

/// Overrides the registry branch.
pub const ENV_REGISTRY_BRANCH_VAR: &str = "BIOENV_REGISTRY_BRANCH";

/// Overrides the version-control client program.
pub const ENV_VCS_PROGRAM_VAR: &str = "BIOENV_GIT";
