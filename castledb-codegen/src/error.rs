//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] castledb_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] castledb_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Two schema names convert to the same identifier in one scope.
    #[error("identifier '{ident}' generated for both {first} and {second}")]
    DuplicateIdentifier {
        /// Colliding identifier.
        ident: String,
        /// What claimed the identifier first.
        first: String,
        /// What claimed it again.
        second: String,
    },

    /// Switch with a value outside its accepted set.
    #[error("invalid value '{value}' for switch '{key}'")]
    InvalidSwitch {
        /// Switch key.
        key: String,
        /// Rejected value.
        value: String,
    },
}

impl CodegenError {
    /// Creates an invalid switch error.
    pub fn invalid_switch(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSwitch {
            key: key.into(),
            value: value.into(),
        }
    }
}
