// ==========================================
// Flight Roster - Import error types
// ==========================================
// Tool: thiserror derive
// Row numbers are 1-based file lines (header = line 1)
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== mapping =====
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("missing value (row {row}, field {field})")]
    MissingValue { row: usize, field: String },

    #[error("type conversion failed (row {row}, field {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
