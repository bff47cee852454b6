//! Excel import/export for score conversion
//!
//! - Import: workbook (.xlsx/.xls/.ods) → ordered `ImportRecord`s, one group per sheet
//! - Export: records + converted values → `hasil_konversi.xlsx`, one sheet per group

mod exporter;
mod importer;

pub use exporter::{build_export_tables, synthesize_records, write_template, ExcelExporter};
pub use importer::{import_workbook_bytes, ExcelImporter};
