//! arch-enforcer CLI tool.
//!
//! Usage:
//! ```bash
//! arch-enforcer validate [OPTIONS] <SOURCE> [CONFIG]
//! arch-enforcer self-validate [OPTIONS]
//! arch-enforcer init
//! ```

use anyhow::{anyhow, Result};
use arch_enforcer_core::ArchitectureError;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Enforces namespace layer boundaries in PHP projects
#[derive(Parser)]
#[command(name = "arch-enforcer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate architecture layers based on config
    #[command(visible_alias = "v")]
    Validate {
        /// Path to application source files
        source: PathBuf,

        /// Path to config file (default: architecture.{toml,yaml,yml,json},
        /// then config/architecture.*)
        config: Option<PathBuf>,

        #[command(flatten)]
        options: ValidateOptions,
    },

    /// Validate the current directory against its own config
    #[command(visible_alias = "s")]
    SelfValidate {
        #[command(flatten)]
        options: ValidateOptions,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Options shared by `validate` and `self-validate`.
#[derive(Args, Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Comma-separated list of ignored paths (e.g.: vendor,var,tests)
    #[arg(short, long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Fail when two layers depend on each other
    #[arg(short = 'c', long)]
    pub no_circular: bool,

    /// Require a directory under SOURCE for every layer
    #[arg(short, long)]
    pub pure: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for validation results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Validate {
            source,
            config,
            options,
        } => commands::validate::run(&source, config.as_deref(), &options),
        Commands::SelfValidate { options } => {
            commands::validate::run(Path::new("./"), None, &options)
        }
        Commands::Init { force } => commands::init::run(force),
    };

    outcome.map_err(render_diagnostic)
}

/// Architecture errors are printed through miette's report handler.
fn render_diagnostic(err: anyhow::Error) -> anyhow::Error {
    match err.downcast::<ArchitectureError>() {
        Ok(architecture) => anyhow!("{:?}", miette::Report::new(architecture)),
        Err(other) => other,
    }
}
