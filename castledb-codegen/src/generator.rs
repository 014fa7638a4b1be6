//! Main code generator.

use crate::config::GeneratorConfig;
use crate::diagnostic::Diagnostic;
use crate::error::CodegenError;
use crate::rust::{DatabaseGenerator, EnumGenerator, RecordGenerator, check_identifiers};
use crate::writer::CodeWriter;
use castledb_schema::naming::field_ident;
use castledb_schema::{Database, validate_database};

/// Output of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Emitted Rust source.
    pub code: String,
    /// Columns skipped because their type is unsupported.
    pub diagnostics: Vec<Diagnostic>,
}

/// Main code generator that produces Rust code from a CastleDB schema.
pub struct Generator<'a> {
    database: &'a Database,
    config: &'a GeneratorConfig,
    source: Option<String>,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given database and configuration.
    #[must_use]
    pub fn new(database: &'a Database, config: &'a GeneratorConfig) -> Self {
        Self {
            database,
            config,
            source: None,
        }
    }

    /// Names the schema source in the header of the emitted code.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Generates the complete Rust source.
    ///
    /// The output is a pure function of the schema and configuration.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the schema fails validation, or
    /// `CodegenError::DuplicateIdentifier` if two schema names convert to the
    /// same identifier. No output is produced in either case.
    pub fn generate(&self) -> Result<GeneratedCode, CodegenError> {
        validate_database(self.database)?;
        check_identifiers(self.database, self.config)?;

        let mut writer = CodeWriter::new();
        let mut diagnostics = Vec::new();

        self.generate_header(&mut writer);
        if let Some(namespace) = &self.config.namespace {
            writer.open(format!("pub mod {}", field_ident(namespace)));
        }

        EnumGenerator::new(self.database).generate(&mut writer);
        RecordGenerator::new(self.database, self.config).generate(&mut writer, &mut diagnostics)?;
        DatabaseGenerator::new(self.database, self.config).generate(&mut writer);

        if self.config.namespace.is_some() {
            writer.close();
        }

        tracing::debug!(
            sheets = self.database.sheets.len(),
            skipped = diagnostics.len(),
            "generated code"
        );

        Ok(GeneratedCode {
            code: writer.finish(),
            diagnostics,
        })
    }

    fn generate_header(&self, writer: &mut CodeWriter) {
        match &self.source {
            Some(source) => writer.line(format!(
                "// Generated by castledb-codegen from {source}. Do not edit."
            )),
            None => writer.line("// Generated by castledb-codegen. Do not edit."),
        }
        writer.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinaryMode;
    use castledb_schema::{SchemaError, parse_database};

    const GAME_DATABASE: &str = r#"{
        "sheets": [
            {
                "name": "items",
                "columns": [
                    { "typeStr": "0", "name": "id" },
                    { "typeStr": "5:Weapon,Armor", "name": "kind" },
                    { "typeStr": "10:Fire,Ice", "name": "effects" },
                    { "typeStr": "6:items", "name": "upgrade", "opt": true },
                    { "typeStr": "7", "name": "icon" }
                ],
                "lines": []
            },
            {
                "name": "monsters",
                "columns": [
                    { "typeStr": "0", "name": "id" },
                    { "typeStr": "8", "name": "drops" },
                    { "typeStr": "16", "name": "script" }
                ],
                "lines": []
            },
            {
                "name": "monsters@drops",
                "columns": [
                    { "typeStr": "6:items", "name": "item" },
                    { "typeStr": "4", "name": "chance" }
                ]
            }
        ]
    }"#;

    fn generate(config: &GeneratorConfig) -> GeneratedCode {
        let db = parse_database(GAME_DATABASE).expect("Failed to parse database");
        Generator::new(&db, config)
            .generate()
            .expect("Failed to generate code")
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = GeneratorConfig::default().with_binary_mode(BinaryMode::On);
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn test_section_order() {
        let generated = generate(&GeneratorConfig::default());
        let code = &generated.code;

        let header = code.find("// Generated by castledb-codegen").expect("header");
        let enums = code.find("pub enum ItemsKind").expect("enum");
        let records = code.find("pub struct Items ").expect("record");
        let aggregate = code.find("pub struct GameDatabase ").expect("aggregate");
        assert!(header < enums && enums < records && records < aggregate);
    }

    #[test]
    fn test_namespace_wraps_everything_once() {
        let config = GeneratorConfig::default().with_namespace("Game");
        let code = generate(&config).code;

        assert_eq!(code.matches("pub mod game {").count(), 1);
        assert!(code.trim_end().ends_with('}'));
        assert!(code.contains("\n    pub struct Items {\n"));
        assert!(code.contains("\n    pub mod items_effects {\n"));
    }

    #[test]
    fn test_binary_only_has_no_json_channel() {
        let config = GeneratorConfig::default().with_binary_mode(BinaryMode::Only);
        let code = generate(&config).code;

        assert!(!code.contains("LoadJson"));
        assert!(!code.contains("::json::"));
        assert!(code.contains("impl ::castledb_core::LoadBinary for GameDatabase {"));
        assert!(code.contains("impl ::castledb_core::SaveBinary for Items {"));
    }

    #[test]
    fn test_diagnostics_name_sheet_and_column() {
        let generated = generate(&GeneratorConfig::default());

        assert_eq!(
            generated.diagnostics,
            vec![
                Diagnostic::unsupported("items", "icon", "Image"),
                Diagnostic::unsupported("monsters", "script", "Dynamic"),
            ]
        );
    }

    #[test]
    fn test_missing_reference_target_is_fatal() {
        let json = r#"{"sheets":[{"name":"items","columns":[
            {"typeStr":"0","name":"id"},
            {"typeStr":"6:npcs","name":"owner"}
        ]}]}"#;
        let db = parse_database(json).expect("Failed to parse database");
        let config = GeneratorConfig::default();

        let result = Generator::new(&db, &config).generate();
        assert!(matches!(
            result,
            Err(CodegenError::Schema(SchemaError::SheetNotFound { ref target, .. })) if target == "npcs"
        ));
    }

    #[test]
    fn test_colliding_identifiers_are_fatal() {
        let json = r#"{"sheets":[{"name":"items","columns":[
            {"typeStr":"3","name":"maxHp"},
            {"typeStr":"3","name":"max_hp"}
        ]}]}"#;
        let db = parse_database(json).expect("Failed to parse database");
        let config = GeneratorConfig::default();

        let result = Generator::new(&db, &config).generate();
        assert!(matches!(
            result,
            Err(CodegenError::DuplicateIdentifier { ref ident, .. }) if ident == "max_hp"
        ));
    }

    #[test]
    fn test_header_names_source() {
        let db = parse_database(GAME_DATABASE).expect("Failed to parse database");
        let config = GeneratorConfig::default();
        let code = Generator::new(&db, &config)
            .with_source("game.cdb")
            .generate()
            .expect("Failed to generate code")
            .code;

        assert!(code.starts_with("// Generated by castledb-codegen from game.cdb. Do not edit.\n"));
    }
}
