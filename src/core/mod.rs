//! Core localization engine.
//!
//! - `registry`: loads the culture files of a directory (CultureRegistry)
//! - `export` / `import`: culture records <-> table grid <-> workbook
//! - `source_files` / `scanner`: finds keys no source file references

pub mod export;
pub mod import;
pub mod record;
pub mod registry;
pub mod scanner;
pub mod source_files;

pub use export::{SHEET_NAME, export, write_workbook};
pub use import::{ImportOutcome, import, import_workbook, read_workbook};
pub use record::{KEY_COLUMN_LABEL, LocalizationRecord, TableGrid, TableRow};
pub use registry::{CultureRegistry, RecordLoadWarning, write_records};
pub use scanner::{ScanOptions, ScanResult, UnreadableFile, scan, scan_files};
pub use source_files::{SourceFilter, SourceFiles, collect_source_files};
