//! # arch-enforcer-core
//!
//! Core model for enforcing namespace layer boundaries.
//!
//! An [`Architecture`] is an ordered list of [`Layer`]s, each naming the
//! namespaces it may depend on. Source files are placed in a layer by their
//! declared namespace and every qualified name they reference is checked
//! against that layer's allowed children.
//!
//! - [`Layer`] and [`Architecture`] for the dependency graph
//! - [`NameExtractor`] and [`BuiltinSymbols`] as the per-language seam
//! - [`RuleEngine`] for deciding single references
//! - [`Analyzer`] for orchestrating validation over many files
//! - [`validate`] for whole-architecture checks (circularity, directory purity)
//!
//! ## Example
//!
//! ```ignore
//! use arch_enforcer_core::{Analyzer, Config};
//!
//! let config = Config::from_file("architecture.toml")?;
//! let analyzer = Analyzer::builder()
//!     .architecture(config.architecture()?.clone())
//!     .extractor(PhpExtractor::new())
//!     .build()?;
//!
//! let result = analyzer.analyze(files);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod architecture;
mod config;
mod engine;
mod extractor;
mod layer;
mod layer_file;
mod types;

/// Architecture-wide validators.
pub mod validate;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use architecture::{Architecture, ArchitectureError};
pub use config::{ArchitectureDef, Config, ConfigError, ConfigFormat};
pub use engine::RuleEngine;
pub use extractor::{BuiltinSymbols, FileAnalysis, NameExtractor, NameRef, NoBuiltins};
pub use layer::{Layer, NAMESPACE_SEPARATOR};
pub use layer_file::LayerFile;
pub use types::{FileReport, Location, ScanResult, Violation};
