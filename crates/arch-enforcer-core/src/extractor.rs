//! Language-agnostic extraction types and traits.
//!
//! `NameExtractor` is the extension point for adding new languages.
//! Implement it to teach arch-enforcer how to find a file's own namespace
//! and every qualified name the file refers to.

/// A qualified name referenced by a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRef {
    /// Referenced name without any leading separator (e.g. `App\Infra\Db`).
    pub name: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl NameRef {
    /// Creates a new reference.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// Result of extracting names from a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    /// The file's declared namespace, if any.
    pub namespace: Option<String>,
    /// Every qualified name found outside the namespace declaration,
    /// in order of appearance, duplicates included.
    pub references: Vec<NameRef>,
}

/// Trait for language-specific name extraction.
///
/// The extractor receives raw source text and returns a [`FileAnalysis`].
pub trait NameExtractor: Send + Sync {
    /// Language identifier (e.g., `"php"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".php"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract the namespace declaration and referenced names.
    fn extract(&self, source: &str) -> FileAnalysis;
}

/// Answers "is this identifier provided by the language runtime itself?".
///
/// Strict layers may use runtime built-ins even though they belong to no
/// configured layer.
pub trait BuiltinSymbols: Send + Sync {
    /// Returns true if `name` is a runtime-provided class or function.
    fn is_builtin(&self, name: &str) -> bool;
}

/// A symbol table that knows no built-ins.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBuiltins;

impl BuiltinSymbols for NoBuiltins {
    fn is_builtin(&self, _name: &str) -> bool {
        false
    }
}
