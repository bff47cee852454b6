//! Conversion session state
//!
//! Holds the current records, the target range, the latest conversion and the
//! last error message. Each action replaces state wholesale; converted values
//! stay tied to their records by position through [`Conversion::slots`].

use crate::core::converter;
use crate::error::{KonversiError, KonversiResult};
use crate::excel::{self, ExcelExporter};
use crate::types::{Conversion, ConversionRange, ExportTables, ImportRecord};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct ConversionSession {
    records: Vec<ImportRecord>,
    range: ConversionRange,
    conversion: Option<Conversion>,
    last_error: Option<String>,
}

impl ConversionSession {
    pub fn new(range: ConversionRange) -> Self {
        Self {
            range,
            ..Default::default()
        }
    }

    pub fn records(&self) -> &[ImportRecord] {
        &self.records
    }

    pub fn range(&self) -> ConversionRange {
        self.range
    }

    pub fn conversion(&self) -> Option<&Conversion> {
        self.conversion.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Raw values as the editable comma separated text
    pub fn input_text(&self) -> String {
        self.records
            .iter()
            .map(|r| r.raw_value.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Replace the records with the contents of a workbook.
    ///
    /// On failure the current records are kept.
    pub fn load_workbook(&mut self, bytes: &[u8]) -> KonversiResult<usize> {
        let result = excel::import_workbook_bytes(bytes);
        let records = self.track(result)?;
        let count = records.len();
        info!(records = count, "workbook loaded");
        self.load_records(records);
        Ok(count)
    }

    /// Replace the records with already imported ones
    pub fn load_records(&mut self, records: Vec<ImportRecord>) {
        self.records = records;
        self.conversion = None;
        self.last_error = None;
    }

    /// Replace the records with hand typed numbers
    pub fn set_manual_input(&mut self, text: &str) {
        self.load_records(excel::synthesize_records(text));
    }

    pub fn set_range(&mut self, range: ConversionRange) {
        self.range = range;
    }

    /// Convert the current records. A failed conversion clears the previous result.
    pub fn convert(&mut self) -> KonversiResult<&Conversion> {
        let raw: Vec<&str> = self.records.iter().map(|r| r.raw_value.as_str()).collect();
        match converter::convert(&raw, self.range) {
            Ok(conversion) => {
                let skipped = conversion.skipped();
                if !skipped.is_empty() {
                    warn!(positions = ?skipped, "entries without a numeric value were skipped");
                }
                self.last_error = None;
                Ok(&*self.conversion.insert(conversion))
            }
            Err(e) => {
                self.conversion = None;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Converted values joined for display, empty before a conversion
    pub fn result_text(&self) -> String {
        self.conversion
            .as_ref()
            .map(|c| converter::join_values(&c.values()))
            .unwrap_or_default()
    }

    /// Per-group tables for every record. Records whose value did not parse
    /// keep their row with an empty converted cell.
    pub fn export_tables(&self) -> KonversiResult<ExportTables> {
        let conversion = self.conversion.as_ref().ok_or(KonversiError::InvalidInput)?;
        excel::build_export_tables(&self.records, &conversion.slots)
    }

    /// The exported workbook as bytes
    pub fn export_bytes(&mut self) -> KonversiResult<Vec<u8>> {
        let result = self
            .export_tables()
            .and_then(|tables| ExcelExporter::new(tables).to_bytes());
        self.track(result)
    }

    fn track<T>(&mut self, result: KonversiResult<T>) -> KonversiResult<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }
}
