//! Error types for churn-encoder.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.
//! The classifiers themselves are total; errors only surface from I/O,
//! parsing, and schema checks.

use thiserror::Error;

/// Result type with churn-encoder error
pub type ChurnResult<T> = Result<T, ChurnError>;

/// Error types for schema, dataset, and settings operations
#[derive(Error, Debug)]
pub enum ChurnError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document failed to parse
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A single JSONL line failed to parse (1-indexed line number)
    #[error("Invalid JSONL at line {line}: {source}")]
    Jsonl {
        /// Line number in the input
        line: usize,
        /// Underlying parse failure
        source: serde_json::Error,
    },

    /// Encoder schema is structurally invalid
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Attribute key has no matching role in the schema
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Role declared in the schema has no attribute value
    #[error("Missing role: {0}")]
    MissingRole(String),
}
