use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, Read, Seek},
    path::Path,
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use zip::ZipArchive;

use super::{Cell, CellType, Row, Sheet, Workbook};
use crate::error::WorkbookError;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Read every sheet of an xlsx file, in workbook declaration order.
///
/// Fails with [`WorkbookError::NoSheets`] when the workbook declares none.
pub fn read_workbook(path: &Path) -> Result<Workbook, WorkbookError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let shared_strings = read_shared_strings(&mut archive)?;
    let declared = read_sheet_declarations(&mut archive)?;
    if declared.is_empty() {
        return Err(WorkbookError::NoSheets);
    }
    let targets = read_relationships(&mut archive)?;

    let mut sheets = Vec::with_capacity(declared.len());
    for (name, rel_id) in declared {
        let target = targets.get(&rel_id).ok_or_else(|| {
            WorkbookError::Invalid(format!(
                "relationship '{}' for sheet '{}' not found",
                rel_id, name
            ))
        })?;
        let rows = read_rows(&mut archive, &part_path(target))?;
        sheets.push(Sheet { name, rows });
    }

    Ok(Workbook {
        sheets,
        shared_strings,
    })
}

/// Relationship targets are relative to `xl/` unless absolute.
fn part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// `(name, relationship id)` of each `<sheet>` in `xl/workbook.xml`.
fn read_sheet_declarations(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<Vec<(String, String)>, WorkbookError> {
    let xml = archive.by_name(WORKBOOK_PART)?;
    let mut reader = Reader::from_reader(BufReader::new(xml));
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = String::new();
                let mut rel_id = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"name" => name = attr.unescape_value()?.into_owned(),
                        b"id" => rel_id = attr.unescape_value()?.into_owned(),
                        _ => {}
                    }
                }
                sheets.push((name, rel_id));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(sheets)
}

fn read_relationships(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<HashMap<String, String>, WorkbookError> {
    let xml = archive.by_name(WORKBOOK_RELS_PART)?;
    let mut reader = Reader::from_reader(BufReader::new(xml));
    reader.config_mut().trim_text(true);

    let mut targets = HashMap::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = attr.unescape_value()?.into_owned(),
                        b"Target" => target = attr.unescape_value()?.into_owned(),
                        _ => {}
                    }
                }
                targets.insert(id, target);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(targets)
}

/// The shared-string table. A workbook without one has no shared strings.
fn read_shared_strings(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<Vec<String>, WorkbookError> {
    let xml = match archive.by_name(SHARED_STRINGS_PART) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut reader = Reader::from_reader(BufReader::new(xml));

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_phonetic = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"rPh" => in_phonetic = true,
                b"t" if !in_phonetic => current.push_str(&read_text_node(&mut reader)?),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

fn read_rows(
    archive: &mut ZipArchive<impl Read + Seek>,
    part: &str,
) -> Result<Vec<Row>, WorkbookError> {
    let xml = archive.by_name(part)?;
    let mut reader = Reader::from_reader(BufReader::new(xml));

    let mut rows = Vec::new();
    let mut current: Option<Row> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => current = Some(row_start(&e)?),
                b"c" => {
                    let mut cell = cell_start(&e)?;
                    read_cell_contents(&mut reader, &mut cell)?;
                    if let Some(row) = current.as_mut() {
                        row.cells.push(cell);
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(row_start(&e)?),
                b"c" => {
                    let cell = cell_start(&e)?;
                    if let Some(row) = current.as_mut() {
                        row.cells.push(cell);
                    }
                }
                _ => {}
            },
            Event::End(e) if e.local_name().as_ref() == b"row" => {
                if let Some(row) = current.take() {
                    rows.push(row);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(rows)
}

fn row_start(e: &BytesStart) -> Result<Row, WorkbookError> {
    let mut row = Row::default();
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"r" {
            row.number = attr.unescape_value()?.trim().parse().ok();
        }
    }
    Ok(row)
}

fn cell_start(e: &BytesStart) -> Result<Cell, WorkbookError> {
    let mut cell = Cell::default();
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"r" => cell.reference = Some(attr.unescape_value()?.into_owned()),
            b"t" => cell.data_type = CellType::from_attribute(&attr.unescape_value()?),
            _ => {}
        }
    }
    Ok(cell)
}

/// Reads up to the closing `</c>`, keeping the `<v>` value or the
/// concatenated `<t>` runs of an inline string. Formulas are skipped.
fn read_cell_contents<R: BufRead>(
    reader: &mut Reader<R>,
    cell: &mut Cell,
) -> Result<(), WorkbookError> {
    let mut in_phonetic = false;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"v" => cell.value = Some(read_text_node(reader)?),
                b"rPh" => in_phonetic = true,
                b"t" if !in_phonetic => {
                    let text = read_text_node(reader)?;
                    cell.value.get_or_insert_with(String::new).push_str(&text);
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"c" => break,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn read_text_node<R: BufRead>(reader: &mut Reader<R>) -> Result<String, WorkbookError> {
    let mut buf = Vec::new();
    let mut text = String::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::End(_) | Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}
