//! Layer resolution: maps namespaces to configured layers.

use std::path::PathBuf;

use miette::Diagnostic;

use crate::layer::Layer;
use crate::validate;

/// Fatal errors in an architecture definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ArchitectureError {
    /// One layer name is a string-prefix of another.
    #[error("Layer conflict between {existing} and {layer}")]
    #[diagnostic(
        code(arch_enforcer::layer_conflict),
        help("layer names must not be prefixes of each other, otherwise a namespace could belong to both")
    )]
    Conflict {
        /// Layer declared first.
        existing: String,
        /// Layer declared later.
        layer: String,
    },

    /// Two layers list each other as children.
    #[error("Circular dependency between {layer} and {other}")]
    #[diagnostic(
        code(arch_enforcer::circular_dependency),
        help("remove one direction of the dependency, or run without --no-circular")
    )]
    Circular {
        /// Layer declared later.
        layer: String,
        /// Layer declared earlier.
        other: String,
    },

    /// A layer has no matching directory under the source root.
    #[error("{} not found, make sure your [{}] contains a [{}] directory", .path.display(), .source_root.display(), .relative.display())]
    #[diagnostic(code(arch_enforcer::missing_layer_directory))]
    MissingDirectory {
        /// Full expected path.
        path: PathBuf,
        /// Scanned source root.
        source_root: PathBuf,
        /// Path derived from the layer name.
        relative: PathBuf,
    },

    /// Purity mode needs to know which namespace maps to the source root.
    #[error("purity check requires `root_namespace` in the config file")]
    #[diagnostic(
        code(arch_enforcer::missing_root_namespace),
        help("add e.g. `root_namespace = \"App\"` to the config")
    )]
    MissingRootNamespace,
}

/// An ordered, immutable set of layers.
///
/// Built once from configuration and shared read-only by every file check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Architecture {
    layers: Vec<Layer>,
}

impl Architecture {
    /// Builds an architecture from `(layer, children)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ArchitectureError::Conflict`] if any layer name is a prefix
    /// of another (including duplicates).
    pub fn new<I, N, C, S>(definition: I) -> Result<Self, ArchitectureError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layers: Vec<Layer> = definition
            .into_iter()
            .map(|(name, children)| Layer::new(name, children))
            .collect();
        validate::check_conflicts(layers.iter().map(Layer::name))?;
        Ok(Self { layers })
    }

    /// Returns the layers in declaration order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns true if no layers are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the first layer whose name is a string-prefix of `namespace`.
    ///
    /// Matching is by characters, not segments: layer `App\Use` owns
    /// namespace `App\User`.
    #[must_use]
    pub fn resolve_layer(&self, namespace: Option<&str>) -> Option<&Layer> {
        let namespace = namespace?;
        self.layers
            .iter()
            .find(|layer| namespace.starts_with(layer.name()))
    }

    /// Exact lookup by layer name.
    #[must_use]
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|layer| layer.name() == name)
    }

    /// Exact lookup by layer name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }
}
