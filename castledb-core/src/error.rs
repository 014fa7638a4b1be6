//! Error types for CastleDB runtime operations.

use thiserror::Error;

/// Core error type for loading and saving generated records.
#[derive(Debug, Error)]
pub enum Error {
    /// Binary input ended before a value could be read.
    #[error("unexpected end of input: required {required} bytes, available {available} bytes")]
    UnexpectedEof {
        /// Required number of bytes.
        required: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// Invalid UTF-8 encoding in a binary string.
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where the string payload starts.
        offset: usize,
    },

    /// A collection is too large for its u32 length prefix.
    #[error("count {count} does not fit in a u32 length prefix")]
    CountOverflow {
        /// Offending element count.
        count: usize,
    },

    /// An element count claims more elements than the remaining input can hold.
    #[error("count {count} of elements of at least {min_size} bytes exceeds the {available} bytes left")]
    CountExceedsInput {
        /// Decoded element count.
        count: usize,
        /// Minimum encoded size of one element.
        min_size: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// A JSON object is missing a required field.
    #[error("missing JSON field '{field}'")]
    MissingField {
        /// Field name.
        field: String,
    },

    /// A JSON field holds a value of the wrong type.
    #[error("JSON field '{field}' is not {expected}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Expected JSON type.
        expected: &'static str,
    },

    /// The JSON document itself could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
        }
    }
}

/// Result type alias for CastleDB runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
