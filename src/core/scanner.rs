//! Used-key discovery over the source and resource trees.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{
    core::{
        UsedKeys,
        file_scanner::{FileRules, ScanResult, WalkIssue, scan_files},
        pattern::{KeyMatcher, KeyPatterns},
    },
    events::{Event, FileKind, KeysDetectedEvent, Logger, UnreadableFileEvent},
};

/// Build the set of keys referenced by source and UI-definition files.
///
/// Source files under `source_dir` are matched with the plain pattern, UI
/// files under `resource_dir` with the `%`-prefixed one. Unreadable files are
/// logged and skipped; a missing root is an error.
pub fn collect_used_keys(
    source_dir: &Path,
    resource_dir: &Path,
    patterns: &KeyPatterns,
    rules: &FileRules,
    logger: &dyn Logger,
) -> Result<UsedKeys> {
    let sources = scan_files(source_dir, rules, |p| rules.is_source_file(p))
        .context("Failed to scan source directory")?;
    let ui_files = scan_files(resource_dir, rules, |p| rules.is_ui_file(p))
        .context("Failed to scan resource directory")?;

    log_skipped(&sources.skipped, FileKind::Source, logger);
    log_skipped(&ui_files.skipped, FileKind::UiDefinition, logger);

    let jobs: Vec<(&PathBuf, FileKind, &KeyMatcher)> =
        file_jobs(&sources, FileKind::Source, &patterns.source)
            .chain(file_jobs(&ui_files, FileKind::UiDefinition, &patterns.ui))
            .collect();

    // Read and match in parallel; merge in traversal order so warnings are stable.
    let results: Vec<Result<HashSet<String>, Event>> = jobs
        .par_iter()
        .map(|(path, kind, matcher)| read_keys(path, *kind, matcher))
        .collect();

    let mut used_keys = UsedKeys::new();
    for result in results {
        match result {
            Ok(keys) => used_keys.extend(keys),
            Err(event) => logger.log(event),
        }
    }

    logger.log(
        KeysDetectedEvent {
            count: used_keys.len(),
        }
        .into(),
    );

    Ok(used_keys)
}

fn file_jobs<'a>(
    scan: &'a ScanResult,
    kind: FileKind,
    matcher: &'a KeyMatcher,
) -> impl Iterator<Item = (&'a PathBuf, FileKind, &'a KeyMatcher)> {
    scan.files.iter().map(move |path| (path, kind, matcher))
}

/// Read a file as strict UTF-8 and extract its keys.
fn read_keys(
    path: &Path,
    kind: FileKind,
    matcher: &KeyMatcher,
) -> Result<HashSet<String>, Event> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(matcher.find_keys(&content)),
        Err(e) => Err(UnreadableFileEvent {
            file_path: path.display().to_string(),
            kind,
            reason: e.to_string(),
        }
        .into()),
    }
}

fn log_skipped(skipped: &[WalkIssue], kind: FileKind, logger: &dyn Logger) {
    for issue in skipped {
        logger.log(
            UnreadableFileEvent {
                file_path: issue.path.clone(),
                kind,
                reason: issue.reason.clone(),
            }
            .into(),
        );
    }
}
