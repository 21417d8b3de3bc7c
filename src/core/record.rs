use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{LocalizationError, Result};

/// File extension of culture files.
pub const RECORD_EXTENSION: &str = "json";

/// Label of the key column in the header row.
pub const KEY_COLUMN_LABEL: &str = "key";

/// One culture's translations, as loaded from (or destined for) a culture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationRecord {
    pub culture: String,
    /// Where the record was loaded from, or where it will be written.
    pub source_path: PathBuf,
    /// Key -> translated text, always in ascending key order.
    pub texts: BTreeMap<String, String>,
}

impl LocalizationRecord {
    pub fn new(culture: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            culture: culture.into(),
            source_path: source_path.into(),
            texts: BTreeMap::new(),
        }
    }

    /// Default destination of a culture: `<dir>/<culture>.json`.
    pub fn default_path(dir: &Path, culture: &str) -> PathBuf {
        dir.join(format!("{}.{}", culture, RECORD_EXTENSION))
    }

    /// Whether `culture` can name a file directly inside a directory:
    /// no separators, not `.` or `..`.
    pub fn is_valid_culture(culture: &str) -> bool {
        !culture.contains(['/', '\\'])
            && Path::new(culture).file_name().and_then(|n| n.to_str()) == Some(culture)
    }

    /// Translation for `key`, treating an empty string like an absent one.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.texts
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Pretty-printed file content, keys in ascending order.
    pub fn to_json(&self) -> Result<String> {
        let file = LocalizationFileRef {
            culture: &self.culture,
            texts: &self.texts,
        };
        serde_json::to_string_pretty(&file)
            .map(|json| format!("{}\n", json))
            .map_err(|source| LocalizationError::RecordSerialize {
                culture: self.culture.clone(),
                source,
            })
    }
}

/// On-disk shape of a culture file. Every field is optional so unrelated
/// JSON files in the same directory parse and can be skipped.
#[derive(Debug, Deserialize)]
pub(crate) struct LocalizationFile {
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default)]
    pub texts: BTreeMap<String, Option<String>>,
}

impl LocalizationFile {
    /// Number of entries whose key is empty or whitespace. A sheet cannot
    /// hold such a key, so they are dropped on load.
    pub fn blank_key_count(&self) -> usize {
        self.texts.keys().filter(|key| key.trim().is_empty()).count()
    }

    /// Converts into a record, or `None` when the culture is missing or blank.
    /// Null translations become empty strings; blank keys are dropped.
    pub fn into_record(self, source_path: PathBuf) -> Option<LocalizationRecord> {
        let culture = self.culture.filter(|c| !c.trim().is_empty())?;
        let texts = self
            .texts
            .into_iter()
            .filter(|(key, _)| !key.trim().is_empty())
            .map(|(key, text)| (key, text.unwrap_or_default()))
            .collect();
        Some(LocalizationRecord {
            culture,
            source_path,
            texts,
        })
    }
}

#[derive(Serialize)]
struct LocalizationFileRef<'a> {
    culture: &'a str,
    texts: &'a BTreeMap<String, String>,
}

/// Spreadsheet-shaped view of a record set: row = key, column = culture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableGrid {
    /// Header row. Column 0 is the key column label, the rest are cultures.
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// 1-based sheet row number.
    pub number: u32,
    pub key: String,
    /// Cell text for columns 1.., aligned with `header[1..]`. Blank cells
    /// are empty strings. Imported rows may be longer than the header when
    /// the sheet holds stray values past the last culture column.
    pub cells: Vec<String>,
}

impl TableGrid {
    /// Culture identifiers, in column order.
    pub fn cultures(&self) -> &[String] {
        self.header.get(1..).unwrap_or_default()
    }
}
