//! Core types for violations and scan results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as scanned.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// A disallowed namespace reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Where the reference occurs.
    pub location: Location,
    /// Display identifier of the offending file (e.g. `App\Domain\User`).
    pub subject: String,
    /// The referenced namespace that is not allowed.
    pub namespace: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(location: Location, subject: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            location,
            subject: subject.into(),
            namespace: namespace.into(),
        }
    }

    /// Human-readable message, e.g. `App\Domain\User:12 cannot use App\Infra\Db`.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} cannot use {}",
            self.subject, self.location.line, self.namespace
        )
    }
}

/// Validation outcome for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// File path as scanned.
    pub path: PathBuf,
    /// Display identifier (`namespace\stem`, or the file name).
    pub subject: String,
    /// Violations in order of appearance.
    pub violations: Vec<Violation>,
}

impl FileReport {
    /// Returns true if the file has no violations.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Result of scanning a set of files.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Per-file reports, in scan order.
    pub files: Vec<FileReport>,
    /// Wall-clock duration of the scan, in milliseconds.
    #[serde(default)]
    pub elapsed_ms: u64,
}

impl ScanResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files scanned.
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.files.len()
    }

    /// Number of files without violations.
    #[must_use]
    pub fn successful(&self) -> usize {
        self.files.iter().filter(|f| f.is_ok()).count()
    }

    /// Number of files with at least one violation.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.scanned() - self.successful()
    }

    /// Total number of violations across all files.
    #[must_use]
    pub fn issues(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }

    /// Returns true if any file has a violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.files.iter().any(|f| !f.is_ok())
    }

    /// Iterates over every violation in scan order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.files.iter().flat_map(|f| f.violations.iter())
    }

    /// Adds the files of another result.
    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
        self.elapsed_ms += other.elapsed_ms;
    }
}
