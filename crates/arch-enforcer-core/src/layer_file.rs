//! A scanned source file together with its resolved layer.

use std::path::{Path, PathBuf};

use crate::architecture::Architecture;
use crate::extractor::{NameExtractor, NameRef};
use crate::layer::{Layer, NAMESPACE_SEPARATOR};

/// A source file placed in the architecture.
///
/// Lives for a single scan; borrows its layer from the shared
/// [`Architecture`].
#[derive(Debug, Clone)]
pub struct LayerFile<'a> {
    path: PathBuf,
    namespace: Option<String>,
    layer: Option<&'a Layer>,
    references: Vec<NameRef>,
}

impl<'a> LayerFile<'a> {
    /// Extracts names from `source` and resolves the file's layer.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        source: &str,
        extractor: &dyn NameExtractor,
        architecture: &'a Architecture,
    ) -> Self {
        let analysis = extractor.extract(source);
        let layer = architecture.resolve_layer(analysis.namespace.as_deref());
        Self {
            path: path.into(),
            namespace: analysis.namespace,
            layer,
            references: analysis.references,
        }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name including its extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns the declared namespace.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the owning layer, if the namespace resolves to one.
    #[must_use]
    pub fn layer(&self) -> Option<&'a Layer> {
        self.layer
    }

    /// Returns referenced names in order of appearance.
    #[must_use]
    pub fn references(&self) -> &[NameRef] {
        &self.references
    }

    /// Identifier used in reports: `namespace\stem`, or the file name when
    /// the file declares no namespace.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => {
                let stem = self
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_default();
                format!("{namespace}{NAMESPACE_SEPARATOR}{stem}")
            }
            None => self.file_name(),
        }
    }
}

impl std::fmt::Display for LayerFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}
