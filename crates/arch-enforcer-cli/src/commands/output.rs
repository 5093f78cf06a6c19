//! Report rendering for validation results.

use anyhow::Result;
use arch_enforcer_core::ScanResult;
use std::io::Write;
use std::path::Path;

use crate::OutputFormat;

const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const BOLD_RED: &str = "\x1b[1;31m";
const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// What was scanned, for the report header.
pub struct ScanContext<'a> {
    /// Source directory as given on the command line.
    pub source: &'a Path,
    /// Effective ignore list.
    pub ignore: &'a [String],
}

/// Writes a validation result in the specified format.
///
/// # Errors
///
/// Returns an error if writing fails or the result cannot be serialized.
pub fn print(
    out: &mut impl Write,
    result: &ScanResult,
    context: &ScanContext<'_>,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(out, result, context, &Palette { color }),
        OutputFormat::Json => print_json(out, result),
        OutputFormat::Compact => print_compact(out, result),
    }
}

struct Palette {
    color: bool,
}

impl Palette {
    fn paint(&self, style: &str, text: impl std::fmt::Display) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn print_text(
    out: &mut impl Write,
    result: &ScanResult,
    context: &ScanContext<'_>,
    palette: &Palette,
) -> Result<()> {
    writeln!(
        out,
        "Scanning directory: {}",
        palette.paint(YELLOW, context.source.display())
    )?;

    if !context.ignore.is_empty() {
        let ignored: Vec<String> = context
            .ignore
            .iter()
            .map(|entry| format!("[{}]", palette.paint(GRAY, entry)))
            .collect();
        writeln!(out, "Ignored: {}", ignored.join(" "))?;
    }

    for file in &result.files {
        let status = if file.is_ok() {
            palette.paint(GREEN, "[OK]")
        } else {
            palette.paint(BOLD_RED, "[ERROR]")
        };
        writeln!(
            out,
            "Scanning {status} {}",
            palette.paint(YELLOW, &file.subject)
        )?;
        for violation in &file.violations {
            writeln!(out, "{}", palette.paint(BOLD_RED, violation))?;
        }
    }

    let scanned = format!("[Scanned: {}]", palette.paint(YELLOW, result.scanned()));
    let successful = format!("[Successful: {}]", palette.paint(GREEN, result.successful()));

    if result.has_violations() {
        writeln!(out, "{}", palette.paint(BOLD_RED, "Issues found"))?;
        writeln!(
            out,
            "{scanned} {successful} [Failed: {}] [Issues: {}]",
            palette.paint(BOLD_RED, result.failed()),
            palette.paint(BOLD_RED, result.issues())
        )?;
    } else {
        writeln!(out, "{}", palette.paint(GREEN, "No issues found"))?;
        writeln!(out, "{scanned} {successful}")?;
    }

    writeln!(
        out,
        "[Time: {}]",
        palette.paint(YELLOW, format!("{}ms", result.elapsed_ms))
    )?;
    Ok(())
}

fn print_json(out: &mut impl Write, result: &ScanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn print_compact(out: &mut impl Write, result: &ScanResult) -> Result<()> {
    for violation in result.violations() {
        writeln!(
            out,
            "{}:{}: cannot use {}",
            violation.location.file.display(),
            violation.location.line,
            violation.namespace,
        )?;
    }
    Ok(())
}
