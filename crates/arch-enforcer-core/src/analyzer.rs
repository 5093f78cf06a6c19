//! Core analyzer for orchestrating per-file validation.

use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::architecture::Architecture;
use crate::engine::RuleEngine;
use crate::extractor::{BuiltinSymbols, NameExtractor, NoBuiltins};
use crate::layer_file::LayerFile;
use crate::types::{FileReport, ScanResult};

/// Errors that can occur while building an [`Analyzer`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// No architecture was supplied.
    #[error("analyzer needs an architecture")]
    MissingArchitecture,

    /// No name extractor was supplied.
    #[error("analyzer needs a name extractor")]
    MissingExtractor,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    architecture: Option<Architecture>,
    extractor: Option<Box<dyn NameExtractor>>,
    builtins: Option<Box<dyn BuiltinSymbols>>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the architecture files are validated against.
    #[must_use]
    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = Some(architecture);
        self
    }

    /// Sets the language extractor.
    #[must_use]
    pub fn extractor<E: NameExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Sets the runtime built-in symbol table used by strict layers.
    #[must_use]
    pub fn builtins<B: BuiltinSymbols + 'static>(mut self, builtins: B) -> Self {
        self.builtins = Some(Box::new(builtins));
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the architecture or extractor is missing.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let architecture = self
            .architecture
            .ok_or(AnalyzerError::MissingArchitecture)?;
        let extractor = self.extractor.ok_or(AnalyzerError::MissingExtractor)?;
        let builtins = self.builtins.unwrap_or_else(|| Box::new(NoBuiltins));

        Ok(Analyzer {
            architecture,
            extractor,
            builtins,
        })
    }
}

/// Validates source files against an architecture.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    architecture: Architecture,
    extractor: Box<dyn NameExtractor>,
    builtins: Box<dyn BuiltinSymbols>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the architecture.
    #[must_use]
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    /// File extensions the configured extractor handles.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        self.extractor.extensions()
    }

    /// Validates a single file's source text.
    #[must_use]
    pub fn analyze_source(&self, path: impl Into<PathBuf>, source: &str) -> FileReport {
        let file = LayerFile::new(path, source, self.extractor.as_ref(), &self.architecture);
        debug!(
            "Analyzing {} (layer: {})",
            file.path().display(),
            file.layer().map_or("-", |l| l.name())
        );

        let violations = RuleEngine::new(&self.architecture, self.builtins.as_ref()).check(&file);
        FileReport {
            path: file.path().to_path_buf(),
            subject: file.display_name(),
            violations,
        }
    }

    /// Validates every `(path, source)` pair. All files are checked even
    /// after violations are found.
    pub fn analyze<I, P, S>(&self, files: I) -> ScanResult
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let started = Instant::now();
        let mut result = ScanResult::new();

        for (path, source) in files {
            result
                .files
                .push(self.analyze_source(path, source.as_ref()));
        }

        result.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Analysis complete: {} issue(s) in {} file(s)",
            result.issues(),
            result.scanned()
        );
        result
    }
}
