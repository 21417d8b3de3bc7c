use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::source_files::{
    DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_SUFFIXES, DEFAULT_EXTENSIONS, SourceFilter,
};

pub const CONFIG_FILE_NAME: &str = ".locsheetrc.json";

/// Fallback workbook file name when the working directory has no name.
pub const DEFAULT_WORKBOOK_FILE_NAME: &str = "localizations.xlsx";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_localization_files_path", alias = "lfp")]
    pub localization_files_path: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbook_path: Option<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_excluded_suffixes")]
    pub excluded_suffixes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

fn default_localization_files_path() -> String {
    ".".to_string()
}

fn default_source_root() -> String {
    ".".to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_excluded_suffixes() -> Vec<String> {
    DEFAULT_EXCLUDED_SUFFIXES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            localization_files_path: default_localization_files_path(),
            source_root: default_source_root(),
            workbook_path: None,
            extensions: default_extensions(),
            excluded_dirs: default_excluded_dirs(),
            excluded_suffixes: default_excluded_suffixes(),
            ignores: Vec::new(),
            jobs: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or
    /// `jobs` is zero.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.jobs == Some(0) {
            bail!("'jobs' must be at least 1");
        }

        Ok(())
    }

    pub fn source_filter(&self) -> Result<SourceFilter> {
        SourceFilter::new(
            &self.extensions,
            &self.excluded_dirs,
            &self.excluded_suffixes,
            &self.ignores,
        )
        .context("Invalid glob pattern in 'ignores'")
    }

    /// Workbook path: explicit setting, else `<current-directory-name>.xlsx`.
    pub fn workbook_path(&self, current_dir: &Path) -> PathBuf {
        match &self.workbook_path {
            Some(path) => PathBuf::from(path),
            None => default_workbook_path(current_dir),
        }
    }
}

pub fn default_workbook_path(current_dir: &Path) -> PathBuf {
    current_dir
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| PathBuf::from(format!("{}.xlsx", name)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK_FILE_NAME))
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
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
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
