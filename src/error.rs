use thiserror::Error;

pub type KonversiResult<T> = Result<T, KonversiError>;

#[derive(Error, Debug)]
pub enum KonversiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The workbook could not be opened or one of its sheets could not be read.
    #[error("failed to read file: {0}")]
    ImportParseFailure(String),

    /// No entry of the input parsed as a number.
    #[error("enter valid numbers: no numeric value found in the input")]
    InvalidInput,

    #[error("minimum ({min}) must be smaller than maximum ({max})")]
    InvalidRange { min: i64, max: i64 },

    /// Records and converted values were not position aligned.
    #[error("length mismatch: {records} records but {converted} converted values")]
    LengthMismatch { records: usize, converted: usize },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("student with id {0} not found")]
    NotFound(u64),
}

impl KonversiError {
    /// Whether the error was caused by what the user supplied, as opposed to an
    /// internal or environmental failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            KonversiError::ImportParseFailure(_)
                | KonversiError::InvalidInput
                | KonversiError::InvalidRange { .. }
                | KonversiError::Validation(_)
                | KonversiError::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            KonversiError::InvalidRange { min: 90, max: 10 }.to_string(),
            "minimum (90) must be smaller than maximum (10)"
        );
        assert_eq!(
            KonversiError::LengthMismatch {
                records: 3,
                converted: 2
            }
            .to_string(),
            "length mismatch: 3 records but 2 converted values"
        );
        assert!(KonversiError::ImportParseFailure("bad zip".to_string())
            .to_string()
            .starts_with("failed to read file"));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(KonversiError::InvalidInput.is_user_error());
        assert!(KonversiError::NotFound(7).is_user_error());
        assert!(!KonversiError::LengthMismatch {
            records: 1,
            converted: 0
        }
        .is_user_error());
        assert!(!KonversiError::Export("disk full".to_string()).is_user_error());
    }
}
