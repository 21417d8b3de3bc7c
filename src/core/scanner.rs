//! Concurrent key usage scan over a source tree.
//!
//! One rayon task per file; each task searches its file for every key and
//! inserts its matches into a mutex-guarded found-set. The parallel
//! iterator returns only after every task has finished, so the set is
//! complete when it is read.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use rayon::prelude::*;

use super::source_files::{SourceFilter, collect_source_files};
use crate::error::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct ScanOptions<'a> {
    /// Worker count. `None` uses rayon's global pool (available parallelism).
    pub jobs: Option<usize>,
    /// Checked before each file; once set, remaining files are skipped.
    pub cancel: Option<&'a AtomicBool>,
}

/// A file that could not be read; the scan continues without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    /// The key universe that was searched for.
    pub all_keys: BTreeSet<String>,
    /// Keys that occur as a substring in at least one scanned file.
    pub found_keys: BTreeSet<String>,
    /// Files selected for scanning, sorted by path.
    pub files: Vec<PathBuf>,
    /// Number of files actually read and searched.
    pub files_scanned: usize,
    pub unreadable: Vec<UnreadableFile>,
    /// Directory entries the walk could not access.
    pub inaccessible: Vec<String>,
    /// At least one file was skipped because cancellation was requested.
    pub cancelled: bool,
}

impl ScanResult {
    /// Keys never found, in ascending order.
    pub fn missing_keys(&self) -> Vec<&str> {
        self.all_keys
            .difference(&self.found_keys)
            .map(String::as_str)
            .collect()
    }
}

/// Scan every file under `root` accepted by `filter` for `keys`.
pub fn scan(
    root: &Path,
    keys: &BTreeSet<String>,
    filter: &SourceFilter,
    options: ScanOptions<'_>,
) -> Result<ScanResult> {
    let sources = collect_source_files(root, filter);
    let mut result = scan_files(&sources.files, keys, options)?;
    result.files = sources.files;
    result.inaccessible = sources.skipped;
    Ok(result)
}

/// Search the given files for `keys`.
pub fn scan_files(
    files: &[PathBuf],
    keys: &BTreeSet<String>,
    options: ScanOptions<'_>,
) -> Result<ScanResult> {
    let found = Mutex::new(BTreeSet::new());
    let unreadable = Mutex::new(Vec::new());
    let scanned = AtomicUsize::new(0);
    let skipped = AtomicBool::new(false);
    let is_cancelled = || options.cancel.is_some_and(|c| c.load(Ordering::Relaxed));

    let work = || {
        files.par_iter().for_each(|path| {
            if is_cancelled() {
                skipped.store(true, Ordering::Relaxed);
                return;
            }

            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    unreadable
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(UnreadableFile {
                            path: path.clone(),
                            error: e.to_string(),
                        });
                    return;
                }
            };
            let content = String::from_utf8_lossy(&bytes);
            let matches: Vec<&String> = keys
                .iter()
                .filter(|key| content.contains(key.as_str()))
                .collect();
            scanned.fetch_add(1, Ordering::Relaxed);

            if !matches.is_empty() {
                found
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend(matches.into_iter().cloned());
            }
        })
    };

    match options.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(work),
        None => work(),
    }

    let mut unreadable = unreadable
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    unreadable.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ScanResult {
        all_keys: keys.clone(),
        found_keys: found.into_inner().unwrap_or_else(PoisonError::into_inner),
        files: files.to_vec(),
        files_scanned: scanned.into_inner(),
        unreadable,
        inaccessible: Vec::new(),
        // Only a file actually skipped makes the result partial
        cancelled: skipped.into_inner(),
    })
}
