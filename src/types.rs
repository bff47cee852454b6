use crate::error::{KonversiError, KonversiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//==============================================================================
// Conversion Model
//==============================================================================

/// Header row written at the top of every exported sheet
pub const EXPORT_HEADER: [&str; 3] = ["Nama Lengkap", "Angka Acak", "Hasil Konversi"];

/// Header row of the upload template
pub const TEMPLATE_HEADER: [&str; 2] = ["Nama Lengkap", "Angka Acak"];

/// Group assigned to records typed in by hand
pub const DEFAULT_GROUP: &str = "Sheet1";

/// Fixed file name of the exported workbook
pub const EXPORT_FILE_NAME: &str = "hasil_konversi.xlsx";

/// One imported row: a label, the raw numeric text and the sheet it came from.
///
/// `raw_value` is kept exactly as read (untrimmed) and is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub label: String,
    pub raw_value: String,
    pub group: String,
}

impl ImportRecord {
    pub fn new(
        label: impl Into<String>,
        raw_value: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            raw_value: raw_value.into(),
            group: group.into(),
        }
    }

    /// Placeholder label for a row without a name
    pub fn placeholder_label(index: usize) -> String {
        format!("Peserta {}", index)
    }
}

/// Target integer interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRange {
    pub min: i64,
    pub max: i64,
}

impl Default for ConversionRange {
    fn default() -> Self {
        Self { min: 85, max: 95 }
    }
}

impl ConversionRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Reject ranges where `min >= max`
    pub fn validate(&self) -> KonversiResult<()> {
        if self.min >= self.max {
            return Err(KonversiError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Result of a conversion, aligned with the input positions.
///
/// `slots[i]` is `None` when input `i` did not parse as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub range: ConversionRange,
    pub slots: Vec<Option<i64>>,
}

impl Conversion {
    /// Converted values of the surviving inputs, in input order
    pub fn values(&self) -> Vec<i64> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Input positions that were excluded from the conversion
    pub fn skipped(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Number of input positions
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One sheet of the exported workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub name: String,
    /// First row is always [`EXPORT_HEADER`]
    pub rows: Vec<[String; 3]>,
}

impl ExportTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: vec![EXPORT_HEADER.map(String::from)],
        }
    }

    /// Append a data row. A record without a converted value gets an empty
    /// third cell.
    pub fn push_row(&mut self, label: &str, raw_value: &str, converted: Option<i64>) {
        let converted = converted.map(|v| v.to_string()).unwrap_or_default();
        self.rows
            .push([label.to_string(), raw_value.to_string(), converted]);
    }

    /// Number of data rows (header excluded)
    pub fn data_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Export tables in first-seen group order
pub type ExportTables = Vec<ExportTable>;

//==============================================================================
// Student Records
//==============================================================================

/// Gender as offered by the student form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JenisKelamin {
    #[serde(rename = "Laki-laki")]
    LakiLaki,
    #[serde(rename = "Perempuan")]
    Perempuan,
}

impl std::fmt::Display for JenisKelamin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JenisKelamin::LakiLaki => write!(f, "Laki-laki"),
            JenisKelamin::Perempuan => write!(f, "Perempuan"),
        }
    }
}

/// A stored student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Siswa {
    pub id: u64,
    pub nama: String,
    pub kelas: String,
    pub jenis_kelamin: JenisKelamin,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiswaInput {
    pub nama: String,
    pub kelas: String,
    pub jenis_kelamin: JenisKelamin,
}

impl SiswaInput {
    pub fn new(nama: impl Into<String>, kelas: impl Into<String>, jenis_kelamin: JenisKelamin) -> Self {
        Self {
            nama: nama.into(),
            kelas: kelas.into(),
            jenis_kelamin,
        }
    }

    /// All fields are required; names and classes are stored trimmed
    pub fn validate(&self) -> KonversiResult<SiswaInput> {
        let nama = self.nama.trim();
        if nama.is_empty() {
            return Err(KonversiError::Validation("nama must not be empty".to_string()));
        }
        let kelas = self.kelas.trim();
        if kelas.is_empty() {
            return Err(KonversiError::Validation("kelas must not be empty".to_string()));
        }
        Ok(SiswaInput::new(nama, kelas, self.jenis_kelamin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validate() {
        assert!(ConversionRange::new(0, 100).validate().is_ok());
        assert!(matches!(
            ConversionRange::new(50, 50).validate(),
            Err(KonversiError::InvalidRange { min: 50, max: 50 })
        ));
        assert!(ConversionRange::new(90, 10).validate().is_err());
    }

    #[test]
    fn test_range_default_matches_form_defaults() {
        assert_eq!(ConversionRange::default(), ConversionRange::new(85, 95));
    }

    #[test]
    fn test_conversion_values_and_skipped() {
        let conversion = Conversion {
            range: ConversionRange::new(0, 10),
            slots: vec![Some(0), None, Some(10), None],
        };
        assert_eq!(conversion.values(), vec![0, 10]);
        assert_eq!(conversion.skipped(), vec![1, 3]);
        assert_eq!(conversion.len(), 4);
    }

    #[test]
    fn test_export_table_starts_with_header() {
        let mut table = ExportTable::new("Kelas A");
        assert_eq!(table.data_rows(), 0);
        table.push_row("Budi", " 72", Some(88));
        table.push_row("Citra", "absen", None);
        assert_eq!(table.rows[0], EXPORT_HEADER.map(String::from));
        assert_eq!(
            table.rows[1],
            ["Budi".to_string(), " 72".to_string(), "88".to_string()]
        );
        assert_eq!(
            table.rows[2],
            ["Citra".to_string(), "absen".to_string(), String::new()]
        );
        assert_eq!(table.data_rows(), 2);
    }

    #[test]
    fn test_jenis_kelamin_serde_names() {
        let json = serde_json::to_string(&JenisKelamin::LakiLaki).unwrap();
        assert_eq!(json, "\"Laki-laki\"");
        let parsed: JenisKelamin = serde_json::from_str("\"Perempuan\"").unwrap();
        assert_eq!(parsed, JenisKelamin::Perempuan);
        assert!(serde_json::from_str::<JenisKelamin>("\"L\"").is_err());
    }

    #[test]
    fn test_siswa_input_validate_trims() {
        let input = SiswaInput::new("  Siti Aminah ", " XII IPS 1", JenisKelamin::Perempuan);
        let clean = input.validate().unwrap();
        assert_eq!(clean.nama, "Siti Aminah");
        assert_eq!(clean.kelas, "XII IPS 1");

        let blank = SiswaInput::new("   ", "XII IPS 1", JenisKelamin::Perempuan);
        assert!(matches!(blank.validate(), Err(KonversiError::Validation(_))));
    }
}
