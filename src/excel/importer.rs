//! Excel importer implementation - workbook → ordered import records

use crate::error::{KonversiError, KonversiResult};
use crate::types::ImportRecord;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

/// Column holding the participant name
const LABEL_COLUMN: u32 = 0;
/// Column holding the raw number
const VALUE_COLUMN: u32 = 1;

/// Excel importer for reading score workbooks from disk
pub struct ExcelImporter {
    path: std::path::PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import every sheet of the workbook, in workbook order
    pub fn import(&self) -> KonversiResult<Vec<ImportRecord>> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| KonversiError::ImportParseFailure(e.to_string()))?;
        read_records(&mut workbook)
    }
}

/// Import a workbook held in memory (an upload, for instance)
pub fn import_workbook_bytes(bytes: &[u8]) -> KonversiResult<Vec<ImportRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| KonversiError::ImportParseFailure(e.to_string()))?;
    read_records(&mut workbook)
}

fn read_records<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> KonversiResult<Vec<ImportRecord>> {
    let sheet_names = workbook.sheet_names().to_vec();
    let mut records = Vec::new();

    for sheet_name in sheet_names {
        // One unreadable sheet fails the whole import
        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            KonversiError::ImportParseFailure(format!("sheet '{}': {}", sheet_name, e))
        })?;

        let before = records.len();
        read_sheet(&sheet_name, &range, &mut records);
        debug!(
            sheet = %sheet_name,
            rows = records.len() - before,
            "imported sheet"
        );
    }

    Ok(records)
}

/// Append the data rows of one sheet. The first used row is the header;
/// columns are read by absolute position.
fn read_sheet(sheet_name: &str, range: &Range<Data>, records: &mut Vec<ImportRecord>) {
    let (Some((header_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return; // Empty sheet
    };

    for row in header_row + 1..=last_row {
        let raw_value = cell_text(range, row, VALUE_COLUMN);
        if raw_value.trim().is_empty() {
            continue;
        }

        let label = cell_text(range, row, LABEL_COLUMN);
        let label = if label.is_empty() {
            ImportRecord::placeholder_label((row - header_row) as usize)
        } else {
            label
        };

        records.push(ImportRecord::new(label, raw_value, sheet_name));
    }
}

/// Text of the cell at absolute sheet position, empty when absent
fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(cell) => cell.to_string(),
    }
}
