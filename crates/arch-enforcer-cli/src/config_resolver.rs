//! Configuration file resolution.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `CONFIG` argument (explicit path)
//! 2. `{project}/architecture.{toml,yaml,yml,json}`
//! 3. `{project}/config/architecture.{toml,yaml,yml,json}`
//! 4. No config found

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly given on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// No config found.
    NotFound,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// Project-level config files, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &[
    "architecture.toml",
    "architecture.yaml",
    "architecture.yml",
    "architecture.json",
    "config/architecture.toml",
    "config/architecture.yaml",
    "config/architecture.yml",
    "config/architecture.json",
];

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    ConfigSource::NotFound
}
