use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the localization pipelines (load, export, import, scan).
#[derive(Debug, Error)]
pub enum LocalizationError {
    /// No file in the directory parsed into a record with a culture.
    #[error("No localization files found in '{}'.", path.display())]
    NoRecordsFound { path: PathBuf },

    /// The localization directory does not exist or is not a directory.
    #[error("Localization directory '{}' does not exist.", path.display())]
    MissingDirectory { path: PathBuf },

    /// The workbook to import is absent, unreadable or has no sheets.
    #[error("Workbook '{}' could not be opened.", path.display())]
    MissingWorkbook {
        path: PathBuf,
        #[source]
        source: WorkbookError,
    },

    /// The workbook destination could not be created or written.
    #[error("Workbook '{}' could not be written.", path.display())]
    WorkbookWrite {
        path: PathBuf,
        #[source]
        source: WorkbookError,
    },

    /// A data row holds a value that cannot be attached to a culture.
    #[error("Row {row}, column {column}: {reason}")]
    MalformedRow {
        row: u32,
        column: String,
        reason: String,
    },

    #[error("Failed to read localization file '{}'.", path.display())]
    RecordRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write localization file '{}'.", path.display())]
    RecordWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize localization file for culture '{culture}'.")]
    RecordSerialize {
        culture: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to start scan workers.")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Low-level failures of the xlsx package reader and writer.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Invalid workbook package: {0}")]
    Invalid(String),
}

pub type Result<T, E = LocalizationError> = std::result::Result<T, E>;
