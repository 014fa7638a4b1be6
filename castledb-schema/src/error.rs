//! Error types for schema parsing and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed `typeStr` value.
    #[error("invalid type '{value}' for column '{column}' in sheet '{sheet}'")]
    InvalidType {
        /// Sheet name.
        sheet: String,
        /// Column name.
        column: String,
        /// Offending `typeStr` value.
        value: String,
    },

    /// Type identifier outside the supported set.
    #[error("unknown type id {type_id} for column '{column}' in sheet '{sheet}'")]
    UnknownTypeId {
        /// Sheet name.
        sheet: String,
        /// Column name.
        column: String,
        /// Type identifier.
        type_id: u32,
    },

    /// Type requires a payload (`id:payload`) that is missing.
    #[error("type {type_id} of column '{column}' in sheet '{sheet}' requires a payload")]
    MissingPayload {
        /// Sheet name.
        sheet: String,
        /// Column name.
        column: String,
        /// Type identifier.
        type_id: u32,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Sheet referenced by a column does not exist.
    #[error("column '{column}' of sheet '{sheet}' refers to unknown sheet '{target}'")]
    SheetNotFound {
        /// Sheet declaring the column.
        sheet: String,
        /// Column name.
        column: String,
        /// Missing sheet name.
        target: String,
    },

    /// Referenced sheet has no key column.
    #[error("column '{column}' of sheet '{sheet}' refers to sheet '{target}' which has no key column")]
    MissingKey {
        /// Sheet declaring the column.
        sheet: String,
        /// Column name.
        column: String,
        /// Target sheet name.
        target: String,
    },

    /// Reference to a sheet that is not exposed at the top level.
    #[error("column '{column}' of sheet '{sheet}' refers to nested sheet '{target}'")]
    NestedReference {
        /// Sheet declaring the column.
        sheet: String,
        /// Column name.
        column: String,
        /// Target sheet name.
        target: String,
    },

    /// Flags column with more labels than bits.
    #[error("flags column '{column}' of sheet '{sheet}' has {count} labels, at most {max} fit")]
    TooManyFlags {
        /// Sheet name.
        sheet: String,
        /// Column name.
        column: String,
        /// Number of labels.
        count: usize,
        /// Bit width of the flags value.
        max: usize,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} '{name}' in '{scope}'")]
    Duplicate {
        /// Kind of definition (sheet, column, label).
        kind: &'static str,
        /// Duplicated name.
        name: String,
        /// Enclosing scope.
        scope: String,
    },
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
            scope: scope.into(),
        }
    }
}
