use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".tcleanrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Required for a run, but may come from the command line instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<String>,
    #[serde(default = "default_sort")]
    pub sort: bool,
    #[serde(default)]
    pub remove_unused: bool,
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    #[serde(default = "default_ui_extension")]
    pub ui_extension: String,
    #[serde(default = "default_translation_prefix")]
    pub translation_prefix: String,
    #[serde(default = "default_translation_extension")]
    pub translation_extension: String,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_resource_dir() -> String {
    "./src/main/resources".to_string()
}

fn default_source_dir() -> String {
    "./src/main/java".to_string()
}

fn default_sort() -> bool {
    true
}

fn default_source_extension() -> String {
    "java".to_string()
}

fn default_ui_extension() -> String {
    "fxml".to_string()
}

fn default_translation_prefix() -> String {
    "lang".to_string()
}

fn default_translation_extension() -> String {
    "properties".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            source_dir: default_source_dir(),
            namespace_id: None,
            sort: default_sort(),
            remove_unused: false,
            source_extension: default_source_extension(),
            ui_extension: default_ui_extension(),
            translation_prefix: default_translation_prefix(),
            translation_extension: default_translation_extension(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, empty file
    /// extensions, or an empty `namespaceId`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for (name, value) in [
            ("sourceExtension", &self.source_extension),
            ("uiExtension", &self.ui_extension),
            ("translationExtension", &self.translation_extension),
        ] {
            if value.is_empty() {
                bail!("'{}' must not be empty", name);
            }
            if value.starts_with('.') {
                bail!("'{}' must not start with a dot: \"{}\"", name, value);
            }
        }

        if self.namespace_id.as_deref() == Some("") {
            bail!("'namespaceId' must not be empty");
        }

        Ok(())
    }

    /// Compiled `ignores` patterns. Call after [`Config::validate`].
    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config {
        namespace_id: Some("my-plugin".to_string()),
        ..Default::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against: the config
    /// file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
