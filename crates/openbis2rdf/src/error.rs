//! Error types for loading and converting openBIS documents.
//!
//! Unknown vocabulary, dangling cross references and untypeable values are
//! not errors: the converter skips or falls back on them. What remains here
//! are the conditions that abort a run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object of type '{type_key}' has no usable @id")]
    MissingLocalId { type_key: String },

    #[error("timestamp {millis} under '{key}' is out of range")]
    TimestampOutOfRange { key: String, millis: i64 },

    #[error("invalid vocabulary table: {message}")]
    Vocabulary { message: String },

    #[error("invalid base URL '{url}': {message}")]
    BaseUrl { url: String, message: String },

    #[error("unknown format: {0}. Use 'ntriples', 'nquads', 'turtle', 'rdfxml' or 'json-ld'.")]
    UnknownFormat(String),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
