//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "architecture.toml";

const DEFAULT_CONFIG: &str = r"# arch-enforcer configuration
#
# Every key under [architecture] is a layer: a namespace prefix. Its list
# holds the namespaces the layer may use. A layer that lists itself is
# strict and may use nothing else except PHP built-ins.

# Namespace that maps to the source directory (needed by --pure)
# root_namespace = 'App'

# Paths excluded from scanning, relative to the source directory
ignore = ['vendor', 'var']

# Extra runtime-provided classes and functions, e.g. from PHP extensions
# builtins = ['Redis']

[architecture]
'App\Domain' = ['App\Domain']
'App\Application' = ['App\Domain']
'App\Infrastructure' = ['App\Domain', 'App\Application']
";

/// Runs the init command in the current directory.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_template(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to describe your layers");
    println!("  2. Run: arch-enforcer validate <SOURCE>");

    Ok(())
}

fn write_template(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_enforcer_core::{Config, ConfigFormat};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG, ConfigFormat::Toml).unwrap();
        let architecture = config.architecture().unwrap();

        let names: Vec<&str> = architecture.layers().iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            ["App\\Domain", "App\\Application", "App\\Infrastructure"]
        );
        assert!(architecture.layers()[0].is_strict());
        assert_eq!(config.ignore, ["vendor", "var"]);
    }

    #[test]
    fn writes_template() {
        let tmp = TempDir::new().unwrap();
        let path = write_template(tmp.path(), false).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "keep").unwrap();

        let err = write_template(tmp.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap(),
            "keep"
        );
    }

    #[test]
    fn force_overwrites() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "old").unwrap();

        write_template(tmp.path(), true).unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap(),
            DEFAULT_CONFIG
        );
    }
}
