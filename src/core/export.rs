//! Culture records -> table grid -> xlsx workbook.

use std::{collections::BTreeSet, path::Path};

use super::record::{KEY_COLUMN_LABEL, LocalizationRecord, TableGrid, TableRow};
use crate::{
    error::{LocalizationError, Result},
    workbook::{self, Cell, Row, SharedStrings, Sheet, Workbook, cell_reference},
};

/// Name of the single sheet written on export.
pub const SHEET_NAME: &str = "Localizations";

/// Build the grid for `records`: one column per record in the given order,
/// one row per distinct key in ascending order.
///
/// Missing and empty translations become blank cells; present ones are trimmed.
pub fn export(records: &[LocalizationRecord]) -> TableGrid {
    let mut header = Vec::with_capacity(records.len() + 1);
    header.push(KEY_COLUMN_LABEL.to_string());
    header.extend(records.iter().map(|r| r.culture.clone()));

    let keys: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.texts.keys().map(String::as_str))
        .collect();

    let rows = keys
        .into_iter()
        .enumerate()
        .map(|(i, key)| TableRow {
            number: i as u32 + 2,
            key: key.to_string(),
            cells: records
                .iter()
                .map(|r| r.text(key).map(str::trim).unwrap_or_default().to_string())
                .collect(),
        })
        .collect();

    TableGrid { header, rows }
}

/// Lay the grid out as a one-sheet workbook. Every row carries one cell per
/// header column; blank values become empty cells that keep their slot.
pub fn to_workbook(grid: &TableGrid) -> Workbook {
    let mut strings = SharedStrings::new();
    let mut sheet = Sheet::new(SHEET_NAME);

    let header_cells = grid
        .header
        .iter()
        .enumerate()
        .map(|(column, text)| text_cell(&mut strings, column, 1, text))
        .collect();
    sheet.rows.push(Row {
        number: Some(1),
        cells: header_cells,
    });

    for (i, row) in grid.rows.iter().enumerate() {
        let number = i as u32 + 2;
        let mut cells = Vec::with_capacity(row.cells.len() + 1);
        cells.push(text_cell(&mut strings, 0, number, &row.key));
        for (offset, text) in row.cells.iter().enumerate() {
            cells.push(text_cell(&mut strings, offset + 1, number, text));
        }
        sheet.rows.push(Row {
            number: Some(number),
            cells,
        });
    }

    Workbook {
        sheets: vec![sheet],
        shared_strings: strings.into_vec(),
    }
}

fn text_cell(strings: &mut SharedStrings, column: usize, row: u32, text: &str) -> Cell {
    let reference = cell_reference(column, row);
    if text.is_empty() {
        Cell::blank(reference)
    } else {
        Cell::shared(reference, strings.intern(text))
    }
}

/// Write the grid to `path` as an xlsx workbook.
pub fn write_workbook(grid: &TableGrid, path: &Path) -> Result<()> {
    workbook::write_workbook(&to_workbook(grid), path).map_err(|source| {
        LocalizationError::WorkbookWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}
