use std::path::PathBuf;

use crate::{
    core::{RecordLoadWarning, ScanResult},
    error::LocalizationError,
};

#[derive(Debug)]
pub enum CommandSummary {
    Export(ExportSummary),
    Import(ImportSummary),
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExportSummary {
    pub workbook_path: PathBuf,
    pub culture_count: usize,
    pub key_count: usize,
    /// Culture files skipped or partly loaded.
    pub skipped_files: Vec<RecordLoadWarning>,
}

#[derive(Debug)]
pub struct ImportSummary {
    pub workbook_path: PathBuf,
    pub written_files: Vec<PathBuf>,
    /// Values that could not be attached to a culture.
    pub row_warnings: Vec<LocalizationError>,
}

#[derive(Debug)]
pub struct ScanSummary {
    pub source_root: PathBuf,
    pub result: ScanResult,
    pub skipped_files: Vec<RecordLoadWarning>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a locsheet command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Problems the command found (unused keys for scan).
    pub problem_count: usize,
    /// If true, exit code 1 is returned when problem_count > 0.
    pub exit_on_problems: bool,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            problem_count: 0,
            exit_on_problems: false,
        }
    }
}
