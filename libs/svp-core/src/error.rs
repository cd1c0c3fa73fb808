//! Error types for svp-core.

use thiserror::Error;

/// Result type alias using LoadError.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading the standards table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("empty input")]
    EmptyInput,

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("missing id at line {line}")]
    MissingId { line: usize },

    #[error("duplicate id {id} at line {line}")]
    DuplicateId { id: String, line: usize },

    #[error("invalid cycle at line {line}: {value}")]
    InvalidCycle { line: usize, value: String },

    #[error("unterminated quoted field starting at line {line}")]
    UnterminatedQuote { line: usize },
}

/// Errors raised when a subject/variant/cycle selection cannot be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("subject {subject} requires a variant")]
    MissingVariant { subject: String },

    #[error("unknown variant {variant} for subject {subject}")]
    UnknownVariant { subject: String, variant: String },

    #[error("cycle {cycle} is not offered for {subject}")]
    UnknownCycle { subject: String, cycle: u8 },

    #[error("unknown literacy filter: {0}")]
    UnknownLiteracy(String),

    #[error("unknown discipline: {0}")]
    UnknownDiscipline(String),
}

/// Errors raised by grade assignment edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradeError {
    #[error("no grade-years are defined for cycle {0}")]
    UnsupportedCycle(u8),

    #[error("standard {0} is not part of this assignment")]
    UnknownStandard(String),

    #[error("grade-year {year} is not part of cycle {cycle}")]
    UnknownYear { year: u8, cycle: u8 },
}

/// Errors raised while writing spreadsheets.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}
