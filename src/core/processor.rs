//! End-to-end run over one resource tree.
//!
//! 1. Collect the used-key set from source and UI-definition files.
//! 2. Reconcile every translation file (in parallel, reported in order).
//! 3. Re-read every translation file and report missing keys.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{
    core::{
        UsedKeys,
        consistency::check_missing_keys,
        file_scanner::{FileRules, scan_files},
        pattern::KeyPatterns,
        properties::{self, Translations},
        reconcile::{ReconcileOptions, partition, reconcile},
        scanner::collect_used_keys,
    },
    events::{
        Event, FileKind, InvalidCharacterEvent, Logger, ProcessingEvent, UnchangedEvent,
        UnreadableFileEvent, UnusedKeyEvent, UpdatedEvent, WouldUpdateEvent, WriteFailedEvent,
    },
};

/// Whether reconciled content is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Apply,
    /// Compute everything, write nothing.
    DryRun,
}

/// Everything a run needs, resolved from config and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root holding translation and UI-definition files.
    pub resource_dir: PathBuf,
    /// Root holding general source files.
    pub source_dir: PathBuf,
    pub namespace_id: String,
    pub options: ReconcileOptions,
    pub rules: FileRules,
    pub mode: WriteMode,
}

/// Outcome of reconciling a single translation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Updated,
    Unchanged,
    WouldUpdate,
    Failed,
}

#[derive(Debug)]
struct FileOutcome {
    status: FileStatus,
    unused: usize,
    events: Vec<Event>,
}

/// Totals of a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub used_keys: usize,
    pub files_processed: usize,
    pub files_updated: usize,
    pub files_unchanged: usize,
    /// Dry-run only.
    pub files_would_update: usize,
    pub files_failed: usize,
    pub unused_keys: usize,
    pub missing_keys: usize,
}

/// Totals of a read-only check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub used_keys: usize,
    pub files_checked: usize,
    pub unused_keys: usize,
    pub missing_keys: usize,
}

impl CheckSummary {
    pub fn issue_count(&self) -> usize {
        self.unused_keys + self.missing_keys
    }
}

pub struct TranslationProcessor {
    settings: Settings,
    patterns: KeyPatterns,
}

impl TranslationProcessor {
    pub fn new(settings: Settings) -> Result<Self> {
        let patterns = KeyPatterns::new(&settings.namespace_id)?;
        Ok(Self { settings, patterns })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reconcile every translation file, then report missing keys.
    ///
    /// Only an inaccessible root fails the run; per-file problems are logged.
    pub fn run(&self, logger: &dyn Logger) -> Result<RunSummary> {
        let used_keys = self.used_keys(logger)?;
        let files = self.translation_files(logger)?;

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| self.process_file(file, &used_keys))
            .collect();

        let mut summary = RunSummary {
            used_keys: used_keys.len(),
            files_processed: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome.status {
                FileStatus::Updated => summary.files_updated += 1,
                FileStatus::Unchanged => summary.files_unchanged += 1,
                FileStatus::WouldUpdate => summary.files_would_update += 1,
                FileStatus::Failed => summary.files_failed += 1,
            }
            summary.unused_keys += outcome.unused;
            logger.log_all(outcome.events);
        }

        summary.missing_keys = check_missing_keys(&files, &used_keys, logger);

        Ok(summary)
    }

    /// Report unused and missing keys per file without writing anything.
    pub fn check(&self, logger: &dyn Logger) -> Result<CheckSummary> {
        let used_keys = self.used_keys(logger)?;
        let files = self.translation_files(logger)?;

        let mut summary = CheckSummary {
            used_keys: used_keys.len(),
            files_checked: files.len(),
            ..Default::default()
        };

        for file in &files {
            let file_path = file.display().to_string();
            let Ok(translations) = load_translations(file, &file_path, logger) else {
                continue;
            };

            for entry in partition(&translations, &used_keys).unused {
                summary.unused_keys += 1;
                logger.log(
                    UnusedKeyEvent {
                        file_path: file_path.clone(),
                        key: entry.key,
                    }
                    .into(),
                );
            }
        }

        summary.missing_keys = check_missing_keys(&files, &used_keys, logger);

        Ok(summary)
    }

    fn used_keys(&self, logger: &dyn Logger) -> Result<UsedKeys> {
        collect_used_keys(
            &self.settings.source_dir,
            &self.settings.resource_dir,
            &self.patterns,
            &self.settings.rules,
            logger,
        )
    }

    fn translation_files(&self, logger: &dyn Logger) -> Result<Vec<PathBuf>> {
        let rules = &self.settings.rules;
        let scan = scan_files(&self.settings.resource_dir, rules, |p| {
            rules.is_translation_file(p)
        })
        .context("Failed to scan resource directory")?;

        for issue in scan.skipped {
            logger.log(
                UnreadableFileEvent {
                    file_path: issue.path,
                    kind: FileKind::Translation,
                    reason: issue.reason,
                }
                .into(),
            );
        }

        Ok(scan.files)
    }

    /// Read, classify and (unless dry-run) rewrite one file.
    ///
    /// Events are buffered so parallel workers never interleave output.
    fn process_file(&self, file: &Path, used_keys: &UsedKeys) -> FileOutcome {
        let file_path = file.display().to_string();
        let mut events: Vec<Event> = vec![
            ProcessingEvent {
                file_path: file_path.clone(),
            }
            .into(),
        ];

        let original = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                events.push(
                    UnreadableFileEvent {
                        file_path,
                        kind: FileKind::Translation,
                        reason: e.to_string(),
                    }
                    .into(),
                );
                return FileOutcome {
                    status: FileStatus::Failed,
                    unused: 0,
                    events,
                };
            }
        };

        let translations = properties::parse(&String::from_utf8_lossy(&original));
        events.extend(invalid_character_events(&translations, &file_path));

        let reconciled = reconcile(&translations, used_keys, self.settings.options);
        let kept = reconciled.kept_count();
        let unused = reconciled.unused_count();

        let status = if reconciled.content.as_bytes() == original.as_slice() {
            events.push(UnchangedEvent { file_path }.into());
            FileStatus::Unchanged
        } else if self.settings.mode == WriteMode::DryRun {
            events.push(
                WouldUpdateEvent {
                    file_path,
                    kept,
                    unused,
                }
                .into(),
            );
            FileStatus::WouldUpdate
        } else {
            match properties::write_atomic(file, &reconciled.content) {
                Ok(()) => {
                    events.push(
                        UpdatedEvent {
                            file_path,
                            kept,
                            unused,
                        }
                        .into(),
                    );
                    FileStatus::Updated
                }
                Err(e) => {
                    events.push(
                        WriteFailedEvent {
                            file_path,
                            reason: format!("{:#}", e),
                        }
                        .into(),
                    );
                    FileStatus::Failed
                }
            }
        };

        FileOutcome {
            status,
            unused,
            events,
        }
    }
}

fn invalid_character_events(translations: &Translations, file_path: &str) -> Vec<Event> {
    translations
        .invalid_entries()
        .map(|entry| {
            InvalidCharacterEvent {
                file_path: file_path.to_string(),
                key: entry.key.clone(),
            }
            .into()
        })
        .collect()
}

/// Load a file for the read-only check, logging invalid characters and failures.
fn load_translations(file: &Path, file_path: &str, logger: &dyn Logger) -> Result<Translations> {
    match properties::load(file) {
        Ok(translations) => {
            logger.log_all(invalid_character_events(&translations, file_path));
            Ok(translations)
        }
        Err(e) => {
            logger.log(
                UnreadableFileEvent {
                    file_path: file_path.to_string(),
                    kind: FileKind::Translation,
                    reason: format!("{:#}", e),
                }
                .into(),
            );
            Err(e)
        }
    }
}
