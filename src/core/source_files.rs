use std::path::{Path, PathBuf};

use glob::{Pattern, PatternError};
use walkdir::{DirEntry, WalkDir};

/// File name suffixes scanned by default (code, templates, markup, script).
pub const DEFAULT_EXTENSIONS: &[&str] = &[".cs", ".tpl", ".html", ".ts"];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "Migrations"];

/// Generated files, excluded even when their extension is scanned.
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[".Designer.cs", ".g.cs"];

/// Which files under a source root take part in a key scan.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub excluded_suffixes: Vec<String>,
    /// Glob patterns matched against the path relative to the root.
    pub ignores: Vec<Pattern>,
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self {
            extensions: to_strings(DEFAULT_EXTENSIONS),
            excluded_dirs: to_strings(DEFAULT_EXCLUDED_DIRS),
            excluded_suffixes: to_strings(DEFAULT_EXCLUDED_SUFFIXES),
            ignores: Vec::new(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SourceFilter {
    pub fn new(
        extensions: &[String],
        excluded_dirs: &[String],
        excluded_suffixes: &[String],
        ignores: &[String],
    ) -> Result<Self, PatternError> {
        let ignores = ignores
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            extensions: extensions.to_vec(),
            excluded_dirs: excluded_dirs.to_vec(),
            excluded_suffixes: excluded_suffixes.to_vec(),
            ignores,
        })
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Whether a file at `relative` (relative to the scan root) is scanned.
    pub fn accepts(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !self.extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            return false;
        }
        if self
            .excluded_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            return false;
        }
        if relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .any(|c| c.as_os_str().to_str().is_some_and(|s| self.is_excluded_dir(s)))
        {
            return false;
        }
        !self.ignores.iter().any(|p| p.matches_path(relative))
    }
}

/// Result of walking a source tree.
#[derive(Debug, Default)]
pub struct SourceFiles {
    /// Accepted files, sorted by path.
    pub files: Vec<PathBuf>,
    /// Entries that could not be accessed during the walk.
    pub skipped: Vec<String>,
}

/// Walk `root` recursively and keep the files `filter` accepts.
/// Excluded directories are pruned rather than walked.
pub fn collect_source_files(root: &Path, filter: &SourceFilter) -> SourceFiles {
    let mut result = SourceFiles::default();

    let keep = |entry: &DirEntry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !entry
                .file_name()
                .to_str()
                .is_some_and(|name| filter.is_excluded_dir(name))
    };

    for entry in WalkDir::new(root).into_iter().filter_entry(keep) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped.push(e.to_string());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if filter.accepts(relative) {
            result.files.push(entry.path().to_path_buf());
        }
    }

    result.files.sort();
    result
}
