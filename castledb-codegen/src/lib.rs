//! # CastleDB Codegen
//!
//! Code generation from CastleDB database schemas.
//!
//! This crate provides:
//! - Rust record types for every sheet, nested sheets included
//! - Enum types and flags constants for labelled columns
//! - An aggregate database type with JSON and binary loaders
//! - Two-phase reference resolution over the loaded rows
//! - Build script integration

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod generator;
pub mod rust;
pub mod writer;

pub use config::{BinaryMode, GeneratorConfig, IdRepresentation};
pub use diagnostic::Diagnostic;
pub use error::CodegenError;
pub use generator::{GeneratedCode, Generator};

use std::path::Path;

/// Generates Rust code from a parsed database.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate(
    database: &castledb_schema::Database,
    config: &GeneratorConfig,
) -> Result<GeneratedCode, CodegenError> {
    Generator::new(database, config).generate()
}

/// Generates Rust code from a CastleDB document string.
///
/// # Arguments
/// * `json` - `.cdb` document content
/// * `config` - Generation settings
///
/// # Returns
/// Generated Rust code and the diagnostics of skipped columns.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_json(
    json: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedCode, CodegenError> {
    let database = castledb_schema::parse_database(json)?;
    generate(&database, config)
}

/// Generates Rust code from a CastleDB document file.
///
/// # Arguments
/// * `path` - Path to the `.cdb` file
/// * `config` - Generation settings
///
/// # Returns
/// Generated Rust code and the diagnostics of skipped columns.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation fails.
pub fn generate_from_file(
    path: &Path,
    config: &GeneratorConfig,
) -> Result<GeneratedCode, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    let database = castledb_schema::parse_database(&json)?;
    let source = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    Generator::new(&database, config).with_source(source).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATABASE: &str = r#"{"sheets":[{"name":"items","columns":[{"typeStr":"0","name":"id"}],"lines":[]}]}"#;

    #[test]
    fn test_generate_from_json() {
        let generated =
            generate_from_json(DATABASE, &GeneratorConfig::default()).expect("Failed to generate");
        assert!(generated.code.contains("pub struct Items {"));
        assert!(generated.diagnostics.is_empty());
    }

    #[test]
    fn test_generate_from_json_rejects_malformed_document() {
        assert!(matches!(
            generate_from_json("{", &GeneratorConfig::default()),
            Err(CodegenError::Parse(_))
        ));
    }

    #[test]
    fn test_generate_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".cdb")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(DATABASE.as_bytes()).expect("Failed to write");

        let generated =
            generate_from_file(file.path(), &GeneratorConfig::default()).expect("Failed to generate");
        let name = file
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .expect("file name");
        assert!(generated.code.starts_with(&format!(
            "// Generated by castledb-codegen from {name}. Do not edit."
        )));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let result = generate_from_file(
            Path::new("/nonexistent/game.cdb"),
            &GeneratorConfig::default(),
        );
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }
}
