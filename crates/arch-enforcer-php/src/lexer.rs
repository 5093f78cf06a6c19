//! PHP name extractor.
//!
//! The declared namespace comes from the first `namespace <name>;` match in
//! the text. References are found by a byte scanner that follows PHP's
//! lexical modes closely enough to know which `A\B` and `\A\B` tokens are
//! real names. Inline HTML, comments, string text and variables never
//! produce references, and neither does the namespace declaration itself.
//! Interpolated `{$...}` and `${...}` expressions inside double-quoted
//! strings, backticks and heredocs are code and are scanned as such.

use regex::Regex;
use tracing::debug;

use arch_enforcer_core::{FileAnalysis, NameExtractor, NameRef};

const NAMESPACE_PATTERN: &str = r"namespace\s+(?<namespace>[^;]+);";

/// Extracts the namespace and qualified names from PHP source.
pub struct PhpExtractor {
    namespace_pattern: Option<Regex>,
}

impl PhpExtractor {
    /// Creates a new PHP extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            namespace_pattern: Regex::new(NAMESPACE_PATTERN).ok(),
        }
    }

    /// Returns the first declared namespace, trimmed.
    #[must_use]
    pub fn namespace(&self, source: &str) -> Option<String> {
        let captures = self.namespace_pattern.as_ref()?.captures(source)?;
        let namespace = captures.name("namespace")?.as_str().trim();
        (!namespace.is_empty()).then(|| namespace.to_string())
    }

    /// Returns every qualified name used outside the namespace declaration,
    /// without its leading separator, in order of appearance.
    #[must_use]
    pub fn references(&self, source: &str) -> Vec<NameRef> {
        Scanner::new(source.as_bytes()).run()
    }
}

impl Default for PhpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExtractor for PhpExtractor {
    fn language_id(&self) -> &'static str {
        "php"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".php"]
    }

    fn extract(&self, source: &str) -> FileAnalysis {
        let analysis = FileAnalysis {
            namespace: self.namespace(source),
            references: self.references(source),
        };
        debug!(
            "Extracted namespace {:?} and {} reference(s)",
            analysis.namespace,
            analysis.references.len()
        );
        analysis
    }
}

fn is_label_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte >= 0x80
}

fn is_label_char(byte: u8) -> bool {
    is_label_start(byte) || byte.is_ascii_digit()
}

struct Scanner<'s> {
    src: &'s [u8],
    pos: usize,
    line: usize,
    /// Between the `namespace` keyword and the next `;`.
    in_declaration: bool,
    /// The previous token was `->`, `?->` or `::`.
    after_member_access: bool,
    references: Vec<NameRef>,
}

impl<'s> Scanner<'s> {
    fn new(src: &'s [u8]) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            in_declaration: false,
            after_member_access: false,
            references: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<NameRef> {
        while self.pos < self.src.len() {
            self.skip_inline_html();
            self.scan_code();
        }
        self.references
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.src[self.pos..].starts_with(prefix)
    }

    fn starts_with_ignore_case(&self, prefix: &[u8]) -> bool {
        self.src
            .get(self.pos..self.pos + prefix.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(prefix))
    }

    fn bump(&mut self) {
        if self.peek() == Some(b'\n') {
            self.line += 1;
        }
        self.pos += 1;
    }

    fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if self.pos >= self.src.len() {
                break;
            }
            self.bump();
        }
    }

    fn read_label(&mut self) {
        while self.peek().is_some_and(is_label_char) {
            self.bump();
        }
    }

    /// Moves past the next open tag, or to the end of input.
    fn skip_inline_html(&mut self) {
        while self.pos < self.src.len() {
            if self.starts_with(b"<?=") {
                self.advance(3);
                return;
            }
            if self.starts_with_ignore_case(b"<?php") {
                self.advance(5);
                return;
            }
            self.bump();
        }
    }

    /// Scans code until a close tag or the end of input.
    fn scan_code(&mut self) {
        self.scan_tokens(false);
    }

    /// Scans an interpolated expression up to and including its closing brace.
    fn scan_interpolation(&mut self) {
        self.after_member_access = false;
        self.scan_tokens(true);
        self.after_member_access = false;
    }

    fn scan_tokens(&mut self, embedded: bool) {
        let mut depth = 0usize;
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() {
                self.bump();
                continue;
            }
            if !embedded && byte == b'?' && self.starts_with(b"?>") {
                self.advance(2);
                return;
            }
            if self.starts_with(b"//") || (byte == b'#' && !self.starts_with(b"#[")) {
                self.skip_line_comment();
                continue;
            }
            if self.starts_with(b"/*") {
                self.skip_block_comment();
                continue;
            }

            let member_name = std::mem::take(&mut self.after_member_access);
            match byte {
                b'-' if self.starts_with(b"->") => {
                    self.advance(2);
                    self.after_member_access = true;
                }
                b'?' if self.starts_with(b"?->") => {
                    self.advance(3);
                    self.after_member_access = true;
                }
                b':' if self.starts_with(b"::") => {
                    self.advance(2);
                    self.after_member_access = true;
                }
                b'\'' | b'"' | b'`' => self.skip_quoted(byte),
                b'<' if self.starts_with(b"<<<") => self.skip_heredoc(),
                b'$' => {
                    self.bump();
                    self.read_label();
                }
                b';' => {
                    self.in_declaration = false;
                    self.bump();
                }
                b'{' if embedded => {
                    depth += 1;
                    self.bump();
                }
                b'}' if embedded => {
                    self.bump();
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                b'0'..=b'9' => self.skip_number(),
                b'\\' => self.scan_name(member_name),
                b if is_label_start(b) => self.scan_name(member_name),
                _ => self.bump(),
            }
        }
    }

    /// `//` and `#` comments end at a newline or a close tag.
    fn skip_line_comment(&mut self) {
        while let Some(byte) = self.peek() {
            if byte == b'\n' || self.starts_with(b"?>") {
                return;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(2);
        while self.pos < self.src.len() {
            if self.starts_with(b"*/") {
                self.advance(2);
                return;
            }
            self.bump();
        }
    }

    /// Skips a string literal. Double quotes and backticks interpolate.
    fn skip_quoted(&mut self, quote: u8) {
        let interpolates = quote != b'\'';
        self.bump();
        while let Some(byte) = self.peek() {
            if byte == b'\\' {
                self.advance(2);
            } else if byte == quote {
                self.bump();
                return;
            } else if interpolates && self.at_interpolation() {
                self.enter_interpolation();
            } else {
                self.bump();
            }
        }
    }

    fn at_interpolation(&self) -> bool {
        self.starts_with(b"{$") || self.starts_with(b"${")
    }

    /// Consumes the opening `{` of `{$` or the `${` and scans the expression.
    fn enter_interpolation(&mut self) {
        if self.peek() == Some(b'{') {
            self.bump();
        } else {
            self.advance(2);
        }
        self.scan_interpolation();
    }

    fn skip_number(&mut self) {
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
        {
            self.bump();
        }
    }

    /// Skips a heredoc or nowdoc body including its closing label. Anything
    /// that is not a well-formed opener is consumed as the `<<<` operator.
    fn skip_heredoc(&mut self) {
        let Some((label, body_start, nowdoc)) = self.heredoc_opener() else {
            self.advance(3);
            return;
        };
        self.advance(body_start - self.pos);

        while self.pos < self.src.len() {
            while matches!(self.peek(), Some(b' ' | b'\t')) {
                self.bump();
            }
            if self.starts_with(label)
                && !self
                    .peek_at(label.len())
                    .is_some_and(is_label_char)
            {
                self.advance(label.len());
                return;
            }
            while let Some(byte) = self.peek() {
                if byte == b'\n' {
                    self.bump();
                    break;
                }
                if nowdoc {
                    self.bump();
                } else if byte == b'\\' && self.peek_at(1) != Some(b'\n') {
                    self.advance(2);
                } else if self.at_interpolation() {
                    self.enter_interpolation();
                } else {
                    self.bump();
                }
            }
        }
    }

    /// Parses `<<<ID`, `<<<"ID"` or `<<<'ID'` followed by a newline.
    /// Returns the label, the offset of the first body byte and whether the
    /// body is a nowdoc.
    fn heredoc_opener(&self) -> Option<(&'s [u8], usize, bool)> {
        let src = self.src;
        let mut i = self.pos + 3;
        while matches!(src.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }

        let quote = match src.get(i) {
            Some(&q) if q == b'\'' || q == b'"' => {
                i += 1;
                Some(q)
            }
            _ => None,
        };

        let start = i;
        if !src.get(i).copied().is_some_and(is_label_start) {
            return None;
        }
        while src.get(i).copied().is_some_and(is_label_char) {
            i += 1;
        }
        let label = &src[start..i];

        if let Some(q) = quote {
            if src.get(i) != Some(&q) {
                return None;
            }
            i += 1;
        }

        let nowdoc = quote == Some(b'\'');
        match src.get(i) {
            Some(b'\n') => Some((label, i + 1, nowdoc)),
            Some(b'\r') if src.get(i + 1) == Some(&b'\n') => Some((label, i + 2, nowdoc)),
            _ => None,
        }
    }

    /// Reads a name token and records it when it is qualified.
    fn scan_name(&mut self, member_name: bool) {
        let line = self.line;

        let fully_qualified = self.peek() == Some(b'\\');
        if fully_qualified {
            if !self.peek_at(1).is_some_and(is_label_start) {
                self.bump();
                return;
            }
            self.bump();
        }

        let label_start = self.pos;
        self.read_label();
        let first_label = &self.src[label_start..self.pos];

        let mut segments = 1;
        while self.peek() == Some(b'\\') && self.peek_at(1).is_some_and(is_label_start) {
            self.bump();
            self.read_label();
            segments += 1;
        }

        let is_namespace_word = !fully_qualified && first_label.eq_ignore_ascii_case(b"namespace");
        if is_namespace_word {
            // `namespace\Foo` is a relative name, bare `namespace` opens a declaration.
            if segments == 1 && !member_name {
                self.in_declaration = true;
            }
            return;
        }

        if (fully_qualified || segments > 1) && !self.in_declaration {
            let name = String::from_utf8_lossy(&self.src[label_start..self.pos]);
            self.references.push(NameRef::new(name, line));
        }
    }
}
