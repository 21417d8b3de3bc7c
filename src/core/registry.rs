//! Loading and saving the per-culture localization files of one directory.

use std::{
    collections::BTreeSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use super::record::{LocalizationFile, LocalizationRecord, RECORD_EXTENSION};
use crate::error::{LocalizationError, Result};

/// A file that was skipped or only partly loaded, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLoadWarning {
    pub file_path: String,
    pub error: String,
}

/// The culture records found directly inside one directory.
#[derive(Debug)]
pub struct CultureRegistry {
    pub directory: PathBuf,
    /// Records in ascending source path order.
    pub records: Vec<LocalizationRecord>,
    /// Files that could not be parsed or lost entries while loading.
    pub warnings: Vec<RecordLoadWarning>,
}

impl CultureRegistry {
    /// Load every `*.json` file directly in `directory` (not recursive).
    ///
    /// Files without a culture are skipped silently; unparsable files
    /// (including invalid UTF-8) are skipped with a warning, as are entries
    /// with a blank key. Fails with [`LocalizationError::NoRecordsFound`]
    /// when no record remains.
    pub fn load(directory: &Path) -> Result<Self> {
        if !directory.is_dir() {
            return Err(LocalizationError::MissingDirectory {
                path: directory.to_path_buf(),
            });
        }

        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for path in record_files(directory)? {
            let content = fs::read(&path).map_err(|source| LocalizationError::RecordRead {
                path: path.clone(),
                source,
            })?;
            let file_path = path.to_string_lossy().to_string();

            // Bytes rather than a string so invalid UTF-8 is a parse warning
            match serde_json::from_slice::<LocalizationFile>(&content) {
                Ok(file) => {
                    let blank_keys = file.blank_key_count();
                    if let Some(record) = file.into_record(path) {
                        if blank_keys > 0 {
                            warnings.push(RecordLoadWarning {
                                file_path,
                                error: format!("dropped {} entry(ies) with an empty key", blank_keys),
                            });
                        }
                        records.push(record);
                    }
                }
                Err(e) => warnings.push(RecordLoadWarning {
                    file_path,
                    error: format!("skipped: {}", e),
                }),
            }
        }

        if records.is_empty() {
            return Err(LocalizationError::NoRecordsFound {
                path: directory.to_path_buf(),
            });
        }

        Ok(Self {
            directory: directory.to_path_buf(),
            records,
            warnings,
        })
    }

    /// Every key of every record, deduplicated and sorted.
    pub fn key_universe(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|record| record.texts.keys().cloned())
            .collect()
    }

    pub fn cultures(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.culture.as_str()).collect()
    }
}

/// Candidate culture files, sorted by path.
fn record_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| LocalizationError::RecordRead {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Write each record to its `source_path`.
///
/// Every record is serialized and staged in a temp file next to its
/// destination before the first destination is replaced, so a serialization
/// or write failure leaves all files unchanged.
pub fn write_records(records: &[LocalizationRecord]) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(records.len());
    for record in records {
        let content = record.to_json()?;
        let path = &record.source_path;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged_file = NamedTempFile::new_in(dir).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            Ok(file)
        });
        let file = staged_file.map_err(|source| LocalizationError::RecordWrite {
            path: path.clone(),
            source,
        })?;
        staged.push((file, path.clone()));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (file, path) in staged {
        file.persist(&path).map_err(|e| LocalizationError::RecordWrite {
            path: path.clone(),
            source: e.error,
        })?;
        written.push(path);
    }
    Ok(written)
}
