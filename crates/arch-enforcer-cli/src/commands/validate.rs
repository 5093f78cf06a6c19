//! Validate command.
//!
//! Loads the architecture, checks the arguments, walks the source directory
//! and reports every disallowed namespace reference.

use anyhow::{bail, Context, Result};
use arch_enforcer_core::{validate, Analyzer, Config, ConfigError, ScanResult};
use arch_enforcer_php::{PhpBuiltins, PhpExtractor};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use super::output::{self, ScanContext};
use super::scan::{discover_files, IgnoreMatcher};
use crate::config_resolver::{self, ConfigSource};
use crate::ValidateOptions;

/// Runs the validate command, exiting with status 1 on violations.
///
/// # Errors
///
/// Returns an error for any fatal configuration or argument problem.
pub fn run(source: &Path, config: Option<&Path>, options: &ValidateOptions) -> Result<()> {
    let config_path = match config_resolver::resolve(Path::new("."), config) {
        ConfigSource::NotFound => {
            bail!("No architecture config found. Run `arch-enforcer init` to create one.")
        }
        found => found
            .path()
            .context("resolved config has no path")?
            .to_path_buf(),
    };
    tracing::info!("Using config: {}", config_path.display());

    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let result = execute(source, &config_path, options, &mut stdout.lock(), color)?;

    if result.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}

/// Validates `source` against the config at `config_path` and writes the
/// report to `out`.
///
/// Fatal checks run in order: config, ignore list, source directory,
/// circular dependencies, purity.
///
/// # Errors
///
/// Returns an error if any fatal check fails or the report cannot be written.
pub fn execute(
    source: &Path,
    config_path: &Path,
    options: &ValidateOptions,
    out: &mut impl Write,
    color: bool,
) -> Result<ScanResult> {
    let config = Config::from_file(config_path).map_err(config_error)?;
    let architecture = config.architecture().map_err(config_error)?.clone();

    let ignore = merge_ignore(&options.ignore, &config.ignore);
    check_source(source, &ignore)?;

    if options.no_circular {
        validate::check_circular(&architecture)?;
    }
    if options.pure {
        validate::check_purity(&architecture, source, config.root_namespace.as_deref())?;
    }

    let analyzer = Analyzer::builder()
        .architecture(architecture)
        .extractor(PhpExtractor::new())
        .builtins(PhpBuiltins::new().with_symbols(&config.builtins))
        .build()?;

    let files = discover_files(source, &IgnoreMatcher::new(&ignore), analyzer.extensions())?;
    tracing::info!("Analyzing {} files", files.len());

    let sources = files
        .into_iter()
        .map(|path| {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path, String::from_utf8_lossy(&bytes).into_owned()))
        })
        .collect::<Result<Vec<(PathBuf, String)>>>()?;

    let result = analyzer.analyze(sources);

    let context = ScanContext {
        source,
        ignore: &ignore,
    };
    output::print(out, &result, &context, options.format, color)?;

    Ok(result)
}

/// Command-line entries first, then config entries; blanks dropped and
/// duplicates removed.
fn merge_ignore(cli: &[String], config: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for entry in cli.iter().chain(config) {
        let entry = entry.trim();
        if !entry.is_empty() && !merged.iter().any(|m| m == entry) {
            merged.push(entry.to_string());
        }
    }
    merged
}

/// The source must be a directory that is not itself ignored.
fn check_source(source: &Path, ignore: &[String]) -> Result<()> {
    let display = source.to_string_lossy();

    if !source.is_dir() {
        bail!("'{display}' is not a valid directory");
    }

    let ignored = ignore
        .iter()
        .any(|entry| display.ends_with(entry.as_str()) || entry.ends_with(display.as_ref()));
    if ignored {
        bail!("Source '{display}' exists in the ignored list");
    }

    Ok(())
}

/// Unwraps architecture errors so they can be reported as diagnostics.
fn config_error(err: ConfigError) -> anyhow::Error {
    match err {
        ConfigError::Architecture(e) => anyhow::Error::new(e),
        other => anyhow::Error::new(other),
    }
}
