use std::{
    io::{Seek, Write},
    path::Path,
};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use tempfile::NamedTempFile;
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

use super::{CellType, Row, Sheet, Workbook, address::cell_reference};
use crate::error::WorkbookError;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const SHARED_STRINGS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const WORKSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const SHARED_STRINGS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";

/// Write `workbook` as an xlsx file at `path`.
///
/// The package is assembled in a temporary file next to `path` and moved
/// into place only once complete. Output depends on the workbook alone, so
/// identical input produces byte-identical files.
pub fn write_workbook(workbook: &Workbook, path: &Path) -> Result<(), WorkbookError> {
    if workbook.sheets.is_empty() {
        return Err(WorkbookError::NoSheets);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    write_package(workbook, temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| WorkbookError::Io(e.error))?;
    Ok(())
}

fn write_package<W: Write + Seek>(workbook: &Workbook, out: W) -> Result<(), WorkbookError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(out);
    let parts = [
        ("[Content_Types].xml", content_types(workbook)?),
        ("_rels/.rels", root_relationships()?),
        ("xl/workbook.xml", workbook_part(workbook)?),
        ("xl/_rels/workbook.xml.rels", workbook_relationships(workbook)?),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&content)?;
    }
    for (i, sheet) in workbook.sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
        zip.write_all(&worksheet_part(sheet)?)?;
    }
    zip.start_file("xl/sharedStrings.xml", options)?;
    zip.write_all(&shared_strings_part(&workbook.shared_strings)?)?;
    zip.finish()?;
    Ok(())
}

/// Thin event-level wrapper so each part reads as a sequence of elements.
struct PartWriter {
    writer: Writer<Vec<u8>>,
}

impl PartWriter {
    fn new() -> Result<Self, WorkbookError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), WorkbookError> {
        let mut start = BytesStart::new(name);
        start.extend_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), WorkbookError> {
        let mut start = BytesStart::new(name);
        start.extend_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), WorkbookError> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), WorkbookError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// `<t>` element, preserving surrounding whitespace when present.
    fn text_element(&mut self, text: &str) -> Result<(), WorkbookError> {
        if text.trim() != text {
            self.open("t", &[("xml:space", "preserve")])?;
        } else {
            self.open("t", &[])?;
        }
        self.text(text)?;
        self.close("t")
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn content_types(workbook: &Workbook) -> Result<Vec<u8>, WorkbookError> {
    let mut part = PartWriter::new()?;
    part.open("Types", &[("xmlns", CONTENT_TYPES_NS)])?;
    part.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    part.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    part.empty(
        "Override",
        &[
            ("PartName", "/xl/workbook.xml"),
            ("ContentType", WORKBOOK_CONTENT_TYPE),
        ],
    )?;
    for i in 1..=workbook.sheets.len() {
        let name = format!("/xl/worksheets/sheet{}.xml", i);
        part.empty(
            "Override",
            &[("PartName", name.as_str()), ("ContentType", WORKSHEET_CONTENT_TYPE)],
        )?;
    }
    part.empty(
        "Override",
        &[
            ("PartName", "/xl/sharedStrings.xml"),
            ("ContentType", SHARED_STRINGS_CONTENT_TYPE),
        ],
    )?;
    part.close("Types")?;
    Ok(part.finish())
}

fn root_relationships() -> Result<Vec<u8>, WorkbookError> {
    let mut part = PartWriter::new()?;
    part.open("Relationships", &[("xmlns", PACKAGE_RELATIONSHIPS_NS)])?;
    part.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", OFFICE_DOCUMENT_REL),
            ("Target", "xl/workbook.xml"),
        ],
    )?;
    part.close("Relationships")?;
    Ok(part.finish())
}

fn workbook_part(workbook: &Workbook) -> Result<Vec<u8>, WorkbookError> {
    let mut part = PartWriter::new()?;
    part.open(
        "workbook",
        &[("xmlns", SPREADSHEET_NS), ("xmlns:r", RELATIONSHIPS_NS)],
    )?;
    part.open("sheets", &[])?;
    for (i, sheet) in workbook.sheets.iter().enumerate() {
        let sheet_id = (i + 1).to_string();
        let rel_id = format!("rId{}", i + 1);
        part.empty(
            "sheet",
            &[
                ("name", sheet.name.as_str()),
                ("sheetId", sheet_id.as_str()),
                ("r:id", rel_id.as_str()),
            ],
        )?;
    }
    part.close("sheets")?;
    part.close("workbook")?;
    Ok(part.finish())
}

fn workbook_relationships(workbook: &Workbook) -> Result<Vec<u8>, WorkbookError> {
    let mut part = PartWriter::new()?;
    part.open("Relationships", &[("xmlns", PACKAGE_RELATIONSHIPS_NS)])?;
    for i in 1..=workbook.sheets.len() {
        let rel_id = format!("rId{}", i);
        let target = format!("worksheets/sheet{}.xml", i);
        part.empty(
            "Relationship",
            &[("Id", rel_id.as_str()), ("Type", WORKSHEET_REL), ("Target", target.as_str())],
        )?;
    }
    let rel_id = format!("rId{}", workbook.sheets.len() + 1);
    part.empty(
        "Relationship",
        &[
            ("Id", rel_id.as_str()),
            ("Type", SHARED_STRINGS_REL),
            ("Target", "sharedStrings.xml"),
        ],
    )?;
    part.close("Relationships")?;
    Ok(part.finish())
}

fn worksheet_part(sheet: &Sheet) -> Result<Vec<u8>, WorkbookError> {
    let mut part = PartWriter::new()?;
    part.open("worksheet", &[("xmlns", SPREADSHEET_NS)])?;
    part.open("sheetData", &[])?;
    for (i, row) in sheet.rows.iter().enumerate() {
        write_row(&mut part, row, i as u32 + 1)?;
    }
    part.close("sheetData")?;
    part.close("worksheet")?;
    Ok(part.finish())
}

fn write_row(part: &mut PartWriter, row: &Row, fallback_number: u32) -> Result<(), WorkbookError> {
    let number = row.number.unwrap_or(fallback_number);
    let number_attr = number.to_string();
    part.open("row", &[("r", number_attr.as_str())])?;

    for (column, cell) in row.cells.iter().enumerate() {
        let reference = cell
            .reference
            .clone()
            .unwrap_or_else(|| cell_reference(column, number));
        let mut attributes = vec![("r", reference.as_str())];
        if let Some(t) = cell.data_type.as_attribute() {
            attributes.push(("t", t));
        }

        match cell.value.as_deref() {
            None => part.empty("c", &attributes)?,
            Some(value) => {
                part.open("c", &attributes)?;
                if cell.data_type == CellType::InlineString {
                    part.open("is", &[])?;
                    part.text_element(value)?;
                    part.close("is")?;
                } else {
                    part.open("v", &[])?;
                    part.text(value)?;
                    part.close("v")?;
                }
                part.close("c")?;
            }
        }
    }

    part.close("row")
}

fn shared_strings_part(strings: &[String]) -> Result<Vec<u8>, WorkbookError> {
    let count = strings.len().to_string();
    let mut part = PartWriter::new()?;
    part.open(
        "sst",
        &[
            ("xmlns", SPREADSHEET_NS),
            ("count", count.as_str()),
            ("uniqueCount", count.as_str()),
        ],
    )?;
    for text in strings {
        part.open("si", &[])?;
        part.text_element(text)?;
        part.close("si")?;
    }
    part.close("sst")?;
    Ok(part.finish())
}
