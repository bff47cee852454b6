//! Konversi Nilai - score range conversion and student records
//!
//! This library rescales a list of numbers linearly onto an integer range,
//! reads the numbers from Excel workbooks and writes the results back out,
//! one sheet per group. It also carries a small in-memory student records
//! store served over HTTP.
//!
//! # Features
//!
//! - Min-max rescaling with positional tracking of unparseable entries
//! - Excel import (every sheet, header row skipped) and export
//! - Explicit conversion session instead of widget-held state
//! - REST API for students and conversions
//!
//! # Example
//!
//! ```
//! use konversi_nilai::core::convert_text;
//! use konversi_nilai::types::ConversionRange;
//!
//! let conversion = convert_text("1, 2, 3", ConversionRange::new(0, 100))?;
//! assert_eq!(conversion.values(), vec![0, 50, 100]);
//! # Ok::<(), konversi_nilai::error::KonversiError>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod siswa;
pub mod types;

// Re-export commonly used types
pub use error::{KonversiError, KonversiResult};
pub use types::{Conversion, ConversionRange, ExportTable, ImportRecord, Siswa, SiswaInput};
