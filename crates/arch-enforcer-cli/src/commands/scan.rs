//! Source file discovery.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One entry of the ignore list.
#[derive(Debug)]
enum IgnoreEntry {
    /// Matches any path component with this name (`vendor`).
    Component(String),
    /// Matches a relative path prefix (`app/Legacy`).
    Prefix(PathBuf),
    /// Matches a relative path, or any of its parents, by glob (`*/cache`).
    Pattern(glob::Pattern),
}

/// Decides which paths under the source directory are excluded.
#[derive(Debug, Default)]
pub struct IgnoreMatcher {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreMatcher {
    /// Builds a matcher from the effective ignore list.
    #[must_use]
    pub fn new(ignore: &[String]) -> Self {
        let entries = ignore
            .iter()
            .filter_map(|raw| {
                let entry = raw.trim().trim_start_matches("./").trim_end_matches('/');
                if entry.is_empty() {
                    return None;
                }
                if entry.contains(['*', '?', '[']) {
                    match glob::Pattern::new(entry) {
                        Ok(pattern) => return Some(IgnoreEntry::Pattern(pattern)),
                        Err(e) => warn!("Invalid ignore pattern '{entry}': {e}"),
                    }
                }
                if entry.contains('/') {
                    Some(IgnoreEntry::Prefix(PathBuf::from(entry)))
                } else {
                    Some(IgnoreEntry::Component(entry.to_string()))
                }
            })
            .collect();
        Self { entries }
    }

    /// Whether a path relative to the source directory is ignored.
    #[must_use]
    pub fn is_ignored(&self, relative: &Path) -> bool {
        self.entries.iter().any(|entry| match entry {
            IgnoreEntry::Component(name) => relative
                .components()
                .any(|c| c.as_os_str() == name.as_str()),
            IgnoreEntry::Prefix(prefix) => relative.starts_with(prefix),
            IgnoreEntry::Pattern(pattern) => relative
                .ancestors()
                .filter(|p| !p.as_os_str().is_empty())
                .any(|p| pattern.matches_path(p)),
        })
    }
}

/// Lists files under `root` with one of `extensions` (given as `".php"`),
/// skipping hidden entries and ignored paths. Sorted by path.
///
/// # Errors
///
/// Returns an error if `root` cannot be walked at all.
pub fn discover_files(
    root: &Path,
    ignore: &IgnoreMatcher,
    extensions: &[&str],
) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.standard_filters(false).hidden(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path: {e}");
                continue;
            }
        };
        let path = entry.path();

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        if !extensions.contains(&ext.as_str()) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if ignore.is_ignored(relative) {
            debug!("Ignoring {}", path.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn matcher(entries: &[&str]) -> IgnoreMatcher {
        let owned: Vec<String> = entries.iter().map(ToString::to_string).collect();
        IgnoreMatcher::new(&owned)
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<?php\n").unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn component_entry_matches_any_depth() {
        let m = matcher(&["vendor"]);
        assert!(m.is_ignored(Path::new("vendor/lib/A.php")));
        assert!(m.is_ignored(Path::new("modules/vendor/A.php")));
        assert!(!m.is_ignored(Path::new("vendors/A.php")));
    }

    #[test]
    fn slash_entry_matches_prefix() {
        let m = matcher(&["app/Legacy/"]);
        assert!(m.is_ignored(Path::new("app/Legacy/Old.php")));
        assert!(!m.is_ignored(Path::new("lib/app/Legacy/Old.php")));
        assert!(!m.is_ignored(Path::new("app/LegacyNew/Old.php")));
    }

    #[test]
    fn glob_entry_matches_parents() {
        let m = matcher(&["*/cache"]);
        assert!(m.is_ignored(Path::new("var/cache/Compiled.php")));
        assert!(!m.is_ignored(Path::new("cache/Compiled.php")));
    }

    #[test]
    fn blank_entries_are_dropped() {
        let m = matcher(&["", "  ", "./"]);
        assert!(!m.is_ignored(Path::new("src/A.php")));
    }

    #[test]
    fn discovers_sorted_php_files() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/B.php");
        touch(tmp.path(), "src/A.php");
        touch(tmp.path(), "src/readme.md");
        touch(tmp.path(), "src/Domain/User.php");

        let files = discover_files(tmp.path(), &IgnoreMatcher::default(), &[".php"]).unwrap();
        assert_eq!(
            relative_names(tmp.path(), &files),
            ["src/A.php", "src/B.php", "src/Domain/User.php"]
        );
    }

    #[test]
    fn skips_hidden_and_ignored_paths() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "src/A.php");
        touch(tmp.path(), "src/.hidden.php");
        touch(tmp.path(), ".cache/B.php");
        touch(tmp.path(), "vendor/lib/C.php");
        touch(tmp.path(), "tests/ATest.php");

        let files = discover_files(tmp.path(), &matcher(&["vendor", "tests"]), &[".php"]).unwrap();
        assert_eq!(relative_names(tmp.path(), &files), ["src/A.php"]);
    }

    #[test]
    fn gitignore_is_not_consulted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "generated/\n").unwrap();
        touch(tmp.path(), "generated/G.php");

        let files = discover_files(tmp.path(), &IgnoreMatcher::default(), &[".php"]).unwrap();
        assert_eq!(relative_names(tmp.path(), &files), ["generated/G.php"]);
    }
}
