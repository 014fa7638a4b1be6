//! # CastleDB Schema
//!
//! CastleDB database schema model and parser.
//!
//! This crate provides:
//! - Type definitions for sheets, columns and column types
//! - Parsing of the schema part of `.cdb` documents
//! - Validation of cross-sheet references and flags capacity
//! - Identifier helpers for code generation

pub mod error;
pub mod naming;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_database, parse_file};
pub use types::{Column, ColumnType, Database, NESTED_SHEET_MARKER, Sheet};
pub use validation::{MAX_FLAGS, validate_database};
