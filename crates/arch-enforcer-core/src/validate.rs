//! Architecture-level checks that run once, before any file is scanned.
//!
//! - [`check_conflicts`] always runs when an [`Architecture`] is built.
//! - [`check_circular`] backs `--no-circular`. It only detects direct
//!   two-layer cycles (`A -> B -> A`); longer chains such as
//!   `A -> B -> C -> A` pass.
//! - [`check_purity`] backs `--pure`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::architecture::{Architecture, ArchitectureError};
use crate::layer::{Layer, NAMESPACE_SEPARATOR};

/// Fails if any name is a string-prefix of a name declared before it, or
/// the other way around.
///
/// # Errors
///
/// Returns [`ArchitectureError::Conflict`] naming both layers.
pub fn check_conflicts<'a, I>(names: I) -> Result<(), ArchitectureError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut verified: Vec<&str> = Vec::new();

    for name in names {
        if let Some(existing) = verified
            .iter()
            .find(|existing| name.starts_with(**existing) || existing.starts_with(name))
        {
            return Err(ArchitectureError::Conflict {
                existing: (*existing).to_string(),
                layer: name.to_string(),
            });
        }
        verified.push(name);
    }

    Ok(())
}

/// Fails if two layers each list the other as a child.
///
/// # Errors
///
/// Returns [`ArchitectureError::Circular`] for the first offending pair.
pub fn check_circular(architecture: &Architecture) -> Result<(), ArchitectureError> {
    let mut seen: Vec<&Layer> = Vec::new();

    for layer in architecture.layers() {
        for other in &seen {
            if other.name() == layer.name() {
                continue;
            }
            if other.has_child(Some(layer.name())) && layer.has_child(Some(other.name())) {
                return Err(ArchitectureError::Circular {
                    layer: layer.name().to_string(),
                    other: other.name().to_string(),
                });
            }
        }
        seen.push(layer);
    }

    debug!("No circular dependencies between {} layers", seen.len());
    Ok(())
}

/// Requires `<source_root>/<layer path>` to be a directory for every layer.
///
/// The layer path is the layer name with `root_namespace\` stripped and
/// namespace separators turned into path separators.
///
/// # Errors
///
/// Returns [`ArchitectureError::MissingRootNamespace`] if `root_namespace`
/// is `None`, or [`ArchitectureError::MissingDirectory`] for the first
/// layer without a directory.
pub fn check_purity(
    architecture: &Architecture,
    source_root: &Path,
    root_namespace: Option<&str>,
) -> Result<(), ArchitectureError> {
    let root_namespace = root_namespace.ok_or(ArchitectureError::MissingRootNamespace)?;

    for layer in architecture.layers() {
        let relative = layer_directory(layer.name(), root_namespace);
        let path = source_root.join(&relative);
        debug!("Layer {} expects {}", layer, path.display());

        if !path.is_dir() {
            return Err(ArchitectureError::MissingDirectory {
                path,
                source_root: source_root.to_path_buf(),
                relative,
            });
        }
    }

    Ok(())
}

fn layer_directory(layer_name: &str, root_namespace: &str) -> PathBuf {
    Layer::remove_root_namespace(layer_name, root_namespace)
        .split(NAMESPACE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}
