//! Cross-file consistency check: used keys absent from a translation file.

use std::path::{Path, PathBuf};

use crate::{
    core::{UsedKeys, properties},
    events::{FileKind, Logger, MissingKeyEvent, UnreadableFileEvent},
};

/// Used keys missing from `translations`, sorted.
pub fn missing_keys<'a>(
    translations: &properties::Translations,
    used_keys: &'a UsedKeys,
) -> Vec<&'a str> {
    let mut missing: Vec<&str> = used_keys
        .iter()
        .filter(|key| !translations.contains_key(key))
        .map(String::as_str)
        .collect();
    missing.sort_unstable();
    missing
}

/// Re-read every file and warn about each used key it lacks.
///
/// Files are only read. Returns the total number of missing keys.
pub fn check_missing_keys(files: &[PathBuf], used_keys: &UsedKeys, logger: &dyn Logger) -> usize {
    files
        .iter()
        .map(|file| check_file(file, used_keys, logger))
        .sum()
}

fn check_file(file: &Path, used_keys: &UsedKeys, logger: &dyn Logger) -> usize {
    let file_path = file.display().to_string();
    let translations = match properties::load(file) {
        Ok(t) => t,
        Err(e) => {
            logger.log(
                UnreadableFileEvent {
                    file_path,
                    kind: FileKind::Translation,
                    reason: format!("{:#}", e),
                }
                .into(),
            );
            return 0;
        }
    };

    let missing = missing_keys(&translations, used_keys);
    for key in &missing {
        logger.log(
            MissingKeyEvent {
                file_path: file_path.clone(),
                key: key.to_string(),
            }
            .into(),
        );
    }
    missing.len()
}
