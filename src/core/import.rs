//! xlsx workbook -> table grid -> culture records.
//!
//! Cells are placed by their declared reference (`r="C7"`) when present and
//! by their ordinal position in the row otherwise.

use std::path::Path;

use super::record::{LocalizationRecord, TableGrid, TableRow};
use crate::{
    error::{LocalizationError, Result, WorkbookError},
    workbook::{
        self, Row, Sheet, Workbook, column_letter_to_index, index_to_column_letter,
        resolve_cell_text,
    },
};

/// Columns past this index (the xlsx column limit) are ignored.
const MAX_COLUMNS: usize = 16_384;

/// Sheet row number reported for header problems.
const HEADER_ROW: u32 = 1;

/// Records rebuilt from a grid, plus the values that could not be placed.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// One record per distinct culture header, in column order.
    pub records: Vec<LocalizationRecord>,
    /// [`LocalizationError::MalformedRow`] entries for skipped values.
    pub warnings: Vec<LocalizationError>,
}

/// Read the first sheet of the workbook at `path` into a grid.
pub fn read_workbook(path: &Path) -> Result<TableGrid> {
    let missing = |source| LocalizationError::MissingWorkbook {
        path: path.to_path_buf(),
        source,
    };

    let workbook = workbook::read_workbook(path).map_err(missing)?;
    let sheet = workbook
        .first_sheet()
        .ok_or_else(|| missing(WorkbookError::NoSheets))?;
    Ok(sheet_to_grid(sheet, &workbook))
}

/// The first row is the header; every following row is a data row whose
/// column 0 holds the key.
pub fn sheet_to_grid(sheet: &Sheet, workbook: &Workbook) -> TableGrid {
    let mut rows = sheet.rows.iter().enumerate();
    let Some((_, header_row)) = rows.next() else {
        return TableGrid::default();
    };

    let header = place_cells(header_row, workbook);
    let rows = rows
        .map(|(i, row)| {
            let mut cells = place_cells(row, workbook);
            let key = if cells.is_empty() {
                String::new()
            } else {
                cells.remove(0)
            };
            TableRow {
                number: row.number.unwrap_or(i as u32 + 1),
                key,
                cells,
            }
        })
        .collect();

    TableGrid { header, rows }
}

/// Resolved cell texts indexed by column. Gaps are empty strings; when two
/// cells claim the same column the first non-blank one is kept.
fn place_cells(row: &Row, workbook: &Workbook) -> Vec<String> {
    let mut placed: Vec<String> = Vec::new();
    for (position, cell) in row.cells.iter().enumerate() {
        let column = cell
            .reference
            .as_deref()
            .and_then(column_letter_to_index)
            .unwrap_or(position);
        if column >= MAX_COLUMNS {
            continue;
        }

        if placed.len() <= column {
            placed.resize(column + 1, String::new());
        }
        if placed[column].is_empty() {
            placed[column] = resolve_cell_text(cell, workbook);
        }
    }
    placed
}

/// Where the values of one culture column go.
#[derive(Debug, Clone, Copy)]
enum CultureColumn {
    Record(usize),
    /// Header is not a usable file name; reported once, values dropped.
    Rejected,
    Missing,
}

/// Rebuild culture records from a grid. Each record's destination is
/// `<output_dir>/<culture>.json`.
///
/// Rows without a key are ignored. Blank cells add nothing. A key seen twice
/// keeps its first value per culture. Values in columns without a culture
/// header are reported as warnings and skipped. A culture header that is not
/// a plain file name (`../x`, `a/b`) is reported once and its column skipped.
pub fn import(grid: &TableGrid, output_dir: &Path) -> ImportOutcome {
    let mut records: Vec<LocalizationRecord> = Vec::new();
    let mut warnings = Vec::new();
    let columns: Vec<CultureColumn> = grid
        .cultures()
        .iter()
        .enumerate()
        .map(|(offset, culture)| {
            if culture.is_empty() {
                return CultureColumn::Missing;
            }
            if !LocalizationRecord::is_valid_culture(culture) {
                warnings.push(LocalizationError::MalformedRow {
                    row: HEADER_ROW,
                    column: index_to_column_letter(offset + 1),
                    reason: format!("culture '{}' is not a valid file name", culture),
                });
                return CultureColumn::Rejected;
            }
            let index = records
                .iter()
                .position(|r| &r.culture == culture)
                .unwrap_or_else(|| {
                    records.push(LocalizationRecord::new(
                        culture.clone(),
                        LocalizationRecord::default_path(output_dir, culture),
                    ));
                    records.len() - 1
                });
            CultureColumn::Record(index)
        })
        .collect();

    for row in &grid.rows {
        if row.key.is_empty() {
            continue;
        }

        for (offset, text) in row.cells.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            match columns.get(offset).copied().unwrap_or(CultureColumn::Missing) {
                CultureColumn::Record(index) => {
                    records[index]
                        .texts
                        .entry(row.key.clone())
                        .or_insert_with(|| text.clone());
                }
                CultureColumn::Rejected => {}
                CultureColumn::Missing => warnings.push(LocalizationError::MalformedRow {
                    row: row.number,
                    column: index_to_column_letter(offset + 1),
                    reason: format!("value for key '{}' has no culture header", row.key),
                }),
            }
        }
    }

    ImportOutcome { records, warnings }
}

/// [`read_workbook`] followed by [`import`]. Nothing is written.
pub fn import_workbook(path: &Path, output_dir: &Path) -> Result<ImportOutcome> {
    let grid = read_workbook(path)?;
    Ok(import(&grid, output_dir))
}
