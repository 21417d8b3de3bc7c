//! Minimal xlsx (Office Open XML spreadsheet) support.
//!
//! Only the parts needed to move a grid of text in and out of a workbook are
//! modelled: sheets, rows, cells and the shared-string table. Styles,
//! formulas and number formats are neither read nor written.

pub mod address;
mod reader;
mod writer;

use std::collections::HashMap;

pub use address::{
    cell_reference, column_letter_to_index, index_to_column_letter, resolve_cell_text,
};
pub use reader::read_workbook;
pub use writer::write_workbook;

/// Data type of a cell, from the `t` attribute of `<c>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellType {
    /// `t="s"`: the value is an index into the shared-string table.
    SharedString,
    /// `t="inlineStr"`: the value is carried by an `<is>` element.
    InlineString,
    /// `t="str"`: a formula result string.
    String,
    /// No `t` attribute, or `t="n"`.
    #[default]
    Number,
    Boolean,
    Error,
}

impl CellType {
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "s" => Self::SharedString,
            "inlineStr" => Self::InlineString,
            "str" => Self::String,
            "b" => Self::Boolean,
            "e" => Self::Error,
            _ => Self::Number,
        }
    }

    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::SharedString => Some("s"),
            Self::InlineString => Some("inlineStr"),
            Self::String => Some("str"),
            Self::Boolean => Some("b"),
            Self::Error => Some("e"),
            Self::Number => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Declared reference such as `"B7"`. Writers may omit it.
    pub reference: Option<String>,
    pub data_type: CellType,
    /// Raw stored value. `None` for a cell element without content.
    pub value: Option<String>,
}

impl Cell {
    /// A cell that only occupies its column slot.
    pub fn blank(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            data_type: CellType::default(),
            value: None,
        }
    }

    pub fn shared(reference: impl Into<String>, index: usize) -> Self {
        Self {
            reference: Some(reference.into()),
            data_type: CellType::SharedString,
            value: Some(index.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// 1-based row number from `<row r="..">`, if declared.
    pub number: Option<u32>,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workbook {
    /// Sheets in workbook declaration order.
    pub sheets: Vec<Sheet>,
    pub shared_strings: Vec<String>,
}

impl Workbook {
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    pub fn shared_string(&self, index: usize) -> Option<&str> {
        self.shared_strings.get(index).map(String::as_str)
    }
}

/// Deduplicating builder for the shared-string table.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table index of `text`, adding it on first use.
    pub fn intern(&mut self, text: &str) -> usize {
        if let Some(&index) = self.index.get(text) {
            return index;
        }
        let index = self.strings.len();
        self.strings.push(text.to_string());
        self.index.insert(text.to_string(), index);
        index
    }

    pub fn into_vec(self) -> Vec<String> {
        self.strings
    }
}
