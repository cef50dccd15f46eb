use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    core::{FileRules, ReconcileOptions, Settings, WriteMode},
    events::{Logger, SettingsEvent},
};

/// Command-line switches that override config values for `clean`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub no_sort: bool,
    pub remove_unused: bool,
    pub mode: WriteMode,
}

/// Resolve the effective settings for a run started in `start_dir`.
///
/// Command-line paths resolve against `start_dir`, config paths against the
/// config file's directory.
pub fn resolve_settings(
    start_dir: &Path,
    common: &CommonArgs,
    overrides: Overrides,
) -> Result<Settings> {
    let loaded = load_config(start_dir)?;
    let config = loaded.config;

    let resource_dir = match &common.resource_dir {
        Some(dir) => start_dir.join(dir),
        None => loaded.base_dir.join(&config.resource_dir),
    };
    let source_dir = match &common.source_dir {
        Some(dir) => start_dir.join(dir),
        None => loaded.base_dir.join(&config.source_dir),
    };

    let namespace_id = common
        .namespace_id
        .clone()
        .or(config.namespace_id.clone())
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| {
            anyhow!(
                "No namespace configured. Pass --namespace or set \"namespaceId\" in {}",
                CONFIG_FILE_NAME
            )
        })?;

    let rules = FileRules {
        ignores: config.ignore_patterns()?,
        ignore_base: Some(normalize(loaded.base_dir.clone())),
        source_extension: config.source_extension,
        ui_extension: config.ui_extension,
        translation_prefix: config.translation_prefix,
        translation_extension: config.translation_extension,
    };

    Ok(Settings {
        resource_dir: normalize(resource_dir),
        source_dir: normalize(source_dir),
        namespace_id,
        options: ReconcileOptions {
            sort: config.sort && !overrides.no_sort,
            remove_unused: config.remove_unused || overrides.remove_unused,
        },
        rules,
        mode: overrides.mode,
    })
}

pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to determine current directory")
}

/// Log the settings banner printed at the start of every run.
pub fn log_settings(settings: &Settings, logger: &dyn Logger) {
    logger.log(
        SettingsEvent {
            resource_dir: settings.resource_dir.display().to_string(),
            source_dir: settings.source_dir.display().to_string(),
            namespace_id: settings.namespace_id.clone(),
            sort: settings.options.sort,
            remove_unused: settings.options.remove_unused,
        }
        .into(),
    );
}

/// Drop `.` components so `./src/main/java` prints as `src/main/java`.
fn normalize(path: PathBuf) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
