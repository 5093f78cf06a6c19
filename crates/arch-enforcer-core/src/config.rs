//! Configuration types for arch-enforcer.
//!
//! A config file declares the layers and what each may depend on:
//!
//! ```toml
//! root_namespace = "App"
//! ignore = ["vendor", "var"]
//!
//! [architecture]
//! 'App\Domain' = ['App\Domain']
//! 'App\Application' = ['App\Domain']
//! 'App\Infrastructure' = ['App\Domain', 'App\Application']
//! ```
//!
//! The same keys are accepted from JSON and YAML files. Layer order is the
//! order of the document. The [`Architecture`] is built while loading, so
//! conflicting layer names are reported as configuration errors.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::architecture::{Architecture, ArchitectureError};

/// Ordered `layer -> allowed namespaces` mapping as written in the config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchitectureDef(Vec<(String, Vec<String>)>);

impl ArchitectureDef {
    /// Returns the layer definitions in document order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.0
    }

    /// Builds the [`Architecture`] this definition describes.
    ///
    /// # Errors
    ///
    /// Returns an error if layer names conflict.
    pub fn build(&self) -> Result<Architecture, ArchitectureError> {
        Architecture::new(
            self.0
                .iter()
                .map(|(name, children)| (name.as_str(), children.iter().map(String::as_str))),
        )
    }
}

impl<N, C, S> FromIterator<(N, C)> for ArchitectureDef
where
    N: Into<String>,
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, children)| {
                    (name.into(), children.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for ArchitectureDef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DefVisitor;

        impl<'de> Visitor<'de> for DefVisitor {
            type Value = ArchitectureDef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of layer names to lists of allowed namespaces")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, children)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((name, children));
                }
                Ok(ArchitectureDef(entries))
            }
        }

        deserializer.deserialize_map(DefVisitor)
    }
}

/// Config file contents as written, before the architecture is built.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    architecture: Option<ArchitectureDef>,
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default, alias = "projectRootNamespace")]
    root_namespace: Option<String>,
    #[serde(default)]
    builtins: Vec<String>,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Layers, absent when the config has no `architecture` key.
    architecture: Option<Architecture>,

    /// Paths excluded from scanning.
    pub ignore: Vec<String>,

    /// Namespace that maps to the source root (needed by the purity check).
    pub root_namespace: Option<String>,

    /// Extra names treated as runtime built-ins.
    pub builtins: Vec<String>,
}

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
    /// `.yml` / `.yaml`
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yml" | "yaml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat { extension }),
        }
    }
}

impl Config {
    /// Creates a config around an already-built architecture.
    #[must_use]
    pub fn new(architecture: Architecture) -> Self {
        Self {
            architecture: Some(architecture),
            ..Self::default()
        }
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, cannot be parsed, or declares conflicting layers.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, format).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from a string in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is invalid for the format or the
    /// layer names conflict.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parsed: Result<RawConfig, String> = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        let raw = parsed.map_err(|message| ConfigError::Parse {
            path: None,
            message,
        })?;

        Ok(Self {
            architecture: raw
                .architecture
                .as_ref()
                .map(ArchitectureDef::build)
                .transpose()?,
            ignore: raw.ignore,
            root_namespace: raw.root_namespace,
            builtins: raw.builtins,
        })
    }

    /// Returns the architecture built from the `architecture` key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingArchitecture`] if the key was absent.
    pub fn architecture(&self) -> Result<&Architecture, ConfigError> {
        self.architecture
            .as_ref()
            .ok_or(ConfigError::MissingArchitecture)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Path does not point to a file.
    #[error("'{}' is not a file", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// IO error reading config file.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Extension is not one of toml, json, yml, yaml.
    #[error("Unsupported config file extension: {extension}")]
    UnsupportedFormat {
        /// Extension as found (lowercased).
        extension: String,
    },

    /// Parse error in config file.
    #[error("Failed to parse config{}: {message}", in_file(.path))]
    Parse {
        /// File the content came from, when known.
        path: Option<PathBuf>,
        /// Parse error message.
        message: String,
    },

    /// The `architecture` key is absent.
    #[error("'architecture' key not set in config file")]
    MissingArchitecture,

    /// The architecture definition is invalid.
    #[error(transparent)]
    Architecture(#[from] ArchitectureError),
}

fn in_file(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
