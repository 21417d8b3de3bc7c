//! Cell addressing: column letters <-> zero-based indices, and cell text
//! resolution through the shared-string table.
//!
//! Column letters are a bijective base-26 numeral (`A`=1 .. `Z`=26,
//! `AA`=27, ...), so `A` maps to index 0, `Z` to 25, `AA` to 26.

use std::sync::LazyLock;

use regex::Regex;

use super::{Cell, CellType, Workbook};

static CELL_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)[0-9]*$").unwrap());

/// Zero-based column index of a cell reference such as `"C7"` or `"AA"`.
///
/// Trailing row digits are ignored. Returns `None` for an empty or
/// malformed reference, or one whose column does not fit in `usize`.
pub fn column_letter_to_index(reference: &str) -> Option<usize> {
    let captures = CELL_REFERENCE_REGEX.captures(reference.trim())?;
    let letters = captures.get(1)?.as_str();

    let mut number: usize = 0;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        number = number.checked_mul(26)?.checked_add(digit)?;
    }

    Some(number - 1)
}

/// Column letters for a zero-based column index (`0` -> `"A"`, `26` -> `"AA"`).
pub fn index_to_column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Reference for a zero-based column and a 1-based row, e.g. `(1, 3)` -> `"B3"`.
pub fn cell_reference(column: usize, row: u32) -> String {
    format!("{}{}", index_to_column_letter(column), row)
}

/// Displayed text of a cell, trimmed.
///
/// Shared-string cells are dereferenced through the workbook's table; every
/// other type yields its stored value. A cell without a value, or with a
/// shared-string index outside the table, yields an empty string.
pub fn resolve_cell_text(cell: &Cell, workbook: &Workbook) -> String {
    let Some(value) = cell.value.as_deref() else {
        return String::new();
    };

    let text = match cell.data_type {
        CellType::SharedString => value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| workbook.shared_string(index))
            .unwrap_or_default(),
        _ => value,
    };

    text.trim().to_string()
}
