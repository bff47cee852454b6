//! Excel exporter implementation - converted records → one sheet per group

use crate::error::{KonversiError, KonversiResult};
use crate::types::{
    ExportTable, ExportTables, ImportRecord, DEFAULT_GROUP, EXPORT_HEADER, TEMPLATE_HEADER,
};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Column widths for name, raw number, converted number
const COLUMN_WIDTHS: [f64; 3] = [32.0, 14.0, 16.0];

/// Build records for numbers typed in by hand.
///
/// Blank entries are skipped; labels count the kept entries from 1.
pub fn synthesize_records(text: &str) -> Vec<ImportRecord> {
    crate::core::split_input(text)
        .into_iter()
        .filter(|entry| !entry.trim().is_empty())
        .enumerate()
        .map(|(idx, entry)| {
            ImportRecord::new(
                ImportRecord::placeholder_label(idx + 1),
                entry.trim(),
                DEFAULT_GROUP,
            )
        })
        .collect()
}

/// Group records with their converted values into per-sheet tables.
///
/// `converted[i]` belongs to `records[i]`; the lists must have equal length.
/// Every record gets a row, `None` leaves the converted cell empty.
pub fn build_export_tables(
    records: &[ImportRecord],
    converted: &[Option<i64>],
) -> KonversiResult<ExportTables> {
    if records.len() != converted.len() {
        return Err(KonversiError::LengthMismatch {
            records: records.len(),
            converted: converted.len(),
        });
    }

    let mut tables: ExportTables = Vec::new();
    let mut index_by_group: HashMap<&str, usize> = HashMap::new();

    for (record, value) in records.iter().zip(converted) {
        let idx = *index_by_group
            .entry(record.group.as_str())
            .or_insert_with(|| {
                tables.push(ExportTable::new(record.group.clone()));
                tables.len() - 1
            });
        tables[idx].push_row(&record.label, &record.raw_value, *value);
    }

    Ok(tables)
}

/// Excel exporter for conversion results
pub struct ExcelExporter {
    tables: ExportTables,
}

impl ExcelExporter {
    /// Create a new Excel exporter
    pub fn new(tables: ExportTables) -> Self {
        Self { tables }
    }

    /// Build the exporter straight from aligned records and values
    pub fn from_records(
        records: &[ImportRecord],
        converted: &[Option<i64>],
    ) -> KonversiResult<Self> {
        Ok(Self::new(build_export_tables(records, converted)?))
    }

    /// Export the tables to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> KonversiResult<()> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| KonversiError::Export(format!("Failed to save Excel file: {}", e)))?;
        Ok(())
    }

    /// Serialize the workbook in memory, for downloads
    pub fn to_bytes(&self) -> KonversiResult<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save_to_buffer()
            .map_err(|e| KonversiError::Export(format!("Failed to build Excel file: {}", e)))
    }

    fn build_workbook(&self) -> KonversiResult<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for table in &self.tables {
            let worksheet = workbook.add_worksheet();
            Self::export_table(worksheet, table, &header_format)?;
            debug!(sheet = %table.name, rows = table.data_rows(), "exported sheet");
        }

        Ok(workbook)
    }

    /// Write a single table to a worksheet
    fn export_table(
        worksheet: &mut Worksheet,
        table: &ExportTable,
        header_format: &Format,
    ) -> KonversiResult<()> {
        worksheet.set_name(&table.name).map_err(|e| {
            KonversiError::Export(format!(
                "Failed to set worksheet name '{}': {}",
                table.name, e
            ))
        })?;

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(|e| KonversiError::Export(format!("Failed to set column width: {}", e)))?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let result = if row_idx == 0 {
                    worksheet.write_string_with_format(
                        row_idx as u32,
                        col_idx as u16,
                        value,
                        header_format,
                    )
                } else {
                    worksheet.write_string(row_idx as u32, col_idx as u16, value)
                };
                result
                    .map_err(|e| KonversiError::Export(format!("Failed to write cell: {}", e)))?;
            }
        }

        Ok(())
    }
}

/// Write the upload template: one sheet with the two input columns
pub fn write_template(output_path: &Path) -> KonversiResult<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(DEFAULT_GROUP)
        .map_err(|e| KonversiError::Export(format!("Failed to set worksheet name: {}", e)))?;

    for (col, title) in TEMPLATE_HEADER.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| KonversiError::Export(format!("Failed to write header: {}", e)))?;
        worksheet
            .set_column_width(col as u16, COLUMN_WIDTHS[col])
            .map_err(|e| KonversiError::Export(format!("Failed to set column width: {}", e)))?;
    }

    workbook
        .save(output_path)
        .map_err(|e| KonversiError::Export(format!("Failed to save Excel file: {}", e)))?;
    Ok(())
}
