use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::super::args::CommonArgs;
use crate::config::{Config, load_config};

/// Configuration for one command, with command-line overrides applied.
pub struct CommandContext {
    pub current_dir: PathBuf,
    pub config: Config,
    pub localization_dir: PathBuf,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let current_dir = env::current_dir().context("Failed to read the current directory")?;
        let config = load_config(&current_dir)?.config;

        let localization_dir = match &common.localization_files_path {
            Some(path) => path.clone(),
            None => PathBuf::from(&config.localization_files_path),
        };

        Ok(Self {
            localization_dir: resolve(&current_dir, &localization_dir),
            current_dir,
            config,
            verbose: common.verbose,
        })
    }

    /// Workbook path from the command line, else from config, else
    /// `<current-directory-name>.xlsx`.
    pub fn workbook_path(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.config.workbook_path(&self.current_dir),
        }
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `path` relative to `base` for display, or `path` unchanged.
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
