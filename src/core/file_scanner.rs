//! Directory walking and file classification for the scanned trees.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use glob::Pattern;
use walkdir::WalkDir;

/// Which files count as source, UI-definition and translation files.
#[derive(Debug, Clone)]
pub struct FileRules {
    /// Extension of general source files (without the dot).
    pub source_extension: String,
    /// Extension of UI-definition files (without the dot).
    pub ui_extension: String,
    /// File name prefix of translation files.
    pub translation_prefix: String,
    /// Extension of translation files (without the dot).
    pub translation_extension: String,
    /// Paths matching any of these patterns are never scanned.
    pub ignores: Vec<Pattern>,
    /// Directory that relative `ignores` patterns are anchored at, usually
    /// the one holding the config file.
    pub ignore_base: Option<PathBuf>,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            source_extension: "java".to_string(),
            ui_extension: "fxml".to_string(),
            translation_prefix: "lang".to_string(),
            translation_extension: "properties".to_string(),
            ignores: Vec::new(),
            ignore_base: None,
        }
    }
}

impl FileRules {
    pub fn is_source_file(&self, path: &Path) -> bool {
        has_extension(path, &self.source_extension)
    }

    pub fn is_ui_file(&self, path: &Path) -> bool {
        has_extension(path, &self.ui_extension)
    }

    pub fn is_translation_file(&self, path: &Path) -> bool {
        let starts_with_prefix = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&self.translation_prefix));
        starts_with_prefix && has_extension(path, &self.translation_extension)
    }

    /// A pattern matches either the full path or the path below `ignore_base`.
    fn is_ignored(&self, path: &Path) -> bool {
        let relative = self
            .ignore_base
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok());
        self.ignores
            .iter()
            .any(|p| p.matches_path(path) || relative.is_some_and(|r| p.matches_path(r)))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// An entry the walker could not access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkIssue {
    pub path: String,
    pub reason: String,
}

/// Result of scanning a directory tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching files in traversal order (sorted by file name per directory).
    pub files: Vec<PathBuf>,
    /// Entries that were skipped because they could not be accessed.
    pub skipped: Vec<WalkIssue>,
}

/// Recursively collect the regular files under `root` accepted by `accept`.
///
/// A missing or non-directory root is an error; anything that goes wrong below
/// the root is recorded in [`ScanResult::skipped`] and the walk continues.
pub fn scan_files(
    root: &Path,
    rules: &FileRules,
    accept: impl Fn(&Path) -> bool,
) -> Result<ScanResult> {
    if !root.exists() {
        bail!("Directory '{}' does not exist.", root.display());
    }
    if !root.is_dir() {
        bail!("'{}' is not a directory.", root.display());
    }

    let mut result = ScanResult::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !rules.is_ignored(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                result.skipped.push(WalkIssue {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && accept(path) {
            result.files.push(path.to_path_buf());
        }
    }

    Ok(result)
}
