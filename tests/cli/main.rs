use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod import;
mod init;
mod scan;

const BIN_NAME: &str = "locsheet";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keeps config discovery from walking above the test project
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write `<dir>/<culture>.json` with the given key/value pairs.
    pub fn write_culture(&self, dir: &str, culture: &str, texts: &[(&str, &str)]) -> Result<()> {
        let texts: serde_json::Map<String, serde_json::Value> = texts
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
            .collect();
        let content = serde_json::to_string_pretty(&serde_json::json!({
            "culture": culture,
            "texts": texts,
        }))?;
        self.write_file(&format!("{dir}/{culture}.json"), &content)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn localization_command(&self, action: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("localization").arg(action);
        cmd
    }

    pub fn export_command(&self) -> Command {
        let mut cmd = self.localization_command("export");
        cmd.arg("excel");
        cmd
    }

    pub fn import_command(&self) -> Command {
        let mut cmd = self.localization_command("import");
        cmd.arg("excel");
        cmd
    }

    pub fn scan_command(&self) -> Command {
        self.localization_command("scan")
    }

    /// Snapshot settings that replace the temp project path with
    /// `[PROJECT]` and its directory name with `[NAME]`.
    pub fn snapshot_settings(&self) -> insta::Settings {
        let mut settings = insta::Settings::clone_current();
        settings.add_filter(
            &regex::escape(&self.project_dir.to_string_lossy()),
            "[PROJECT]",
        );
        if let Some(name) = self.project_dir.file_name() {
            settings.add_filter(&regex::escape(&name.to_string_lossy()), "[NAME]");
        }
        settings
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<serde_json::Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {path}"))
    }
}
