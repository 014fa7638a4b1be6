//! Record code generation.
//!
//! One struct per sheet, nested sheets included. Each record gets its field
//! declarations from the [`TypeMapper`], a `clear` method when it owns lists
//! or references, the reference accessors and resolution pass, and the
//! load/save trait implementations enabled by the configuration.

use crate::config::GeneratorConfig;
use crate::diagnostic::Diagnostic;
use crate::error::CodegenError;
use crate::rust::database::keys_type;
use crate::rust::types::{
    ColumnMapping, FieldMapping, TypeMapper, collection_field, column_field, key_setter,
    pending_key_field, record_type, row_accessor,
};
use crate::writer::CodeWriter;
use castledb_schema::naming::type_ident;
use castledb_schema::{Column, ColumnType, Database, Sheet};

/// Generator for sheet records.
pub struct RecordGenerator<'a> {
    database: &'a Database,
    config: &'a GeneratorConfig,
    mapper: TypeMapper<'a>,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(database: &'a Database, config: &'a GeneratorConfig) -> Self {
        Self {
            database,
            config,
            mapper: TypeMapper::new(database, config),
        }
    }

    /// Generates the record of every sheet in schema order.
    ///
    /// Columns whose type has no emitted representation are skipped and
    /// reported in `diagnostics`.
    ///
    /// # Errors
    /// Returns `CodegenError` if a column cannot be mapped.
    pub fn generate(
        &self,
        writer: &mut CodeWriter,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), CodegenError> {
        for sheet in &self.database.sheets {
            self.generate_record(writer, sheet, diagnostics)?;
        }
        Ok(())
    }

    fn generate_record(
        &self,
        writer: &mut CodeWriter,
        sheet: &Sheet,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), CodegenError> {
        let name = record_type(&sheet.name);
        tracing::debug!(sheet = %sheet.name, record = %name, "generating record");

        let mut columns: Vec<(&Column, FieldMapping)> = Vec::with_capacity(sheet.columns.len());
        for column in &sheet.columns {
            match self.mapper.map(sheet, column)? {
                ColumnMapping::Mapped(mapping) => columns.push((column, mapping)),
                ColumnMapping::Unsupported => {
                    let diagnostic =
                        Diagnostic::unsupported(&sheet.name, &column.name, column.column_type.name());
                    tracing::warn!(%diagnostic, "skipping column");
                    diagnostics.push(diagnostic);
                }
            }
        }

        self.generate_struct(writer, sheet, &name, &columns);
        self.generate_impl(writer, sheet, &name, &columns);
        if self.config.binary_mode.emits_json() {
            self.generate_load_json(writer, &name, &columns);
        }
        if self.config.binary_mode.emits_binary() {
            self.generate_load_binary(writer, &name, &columns);
            self.generate_save_binary(writer, &name, &columns);
        }
        if let Some(inherit) = &self.config.inherit {
            writer.line(format!("impl {inherit} for {name} {{}}"));
            writer.blank();
        }

        Ok(())
    }

    fn generate_struct(
        &self,
        writer: &mut CodeWriter,
        sheet: &Sheet,
        name: &str,
        columns: &[(&Column, FieldMapping)],
    ) {
        writer.line(format!("/// Row of sheet `{}`.", sheet.name));
        writer.line("#[derive(Debug, Clone, Default, PartialEq)]");
        writer.open(format!("pub struct {name}"));
        for (_, mapping) in columns {
            for field in &mapping.fields {
                writer.lines(&field.render());
            }
        }
        writer.close();
        writer.blank();
    }

    fn generate_impl(
        &self,
        writer: &mut CodeWriter,
        sheet: &Sheet,
        name: &str,
        columns: &[(&Column, FieldMapping)],
    ) {
        let database = type_ident(&self.config.database_name);

        writer.open(format!("impl {name}"));
        writer.line("/// Name of the sheet in the database document.");
        writer.line(format!(
            "pub const SHEET_NAME: &'static str = {:?};",
            sheet.name
        ));

        for (column, _) in columns {
            let ColumnType::Ref(target) = &column.column_type else {
                continue;
            };
            let field = column_field(column);
            let key = pending_key_field(column);

            writer.blank();
            writer.line(format!(
                "/// Key the `{}` reference was loaded with.",
                column.name
            ));
            writer.line("#[must_use]");
            writer.open(format!("pub fn {key}(&self) -> &str"));
            writer.line(format!("&self.{key}"));
            writer.close();
            writer.blank();

            writer.line(format!(
                "/// Replaces the key of the `{}` reference and unsets it until the next resolution.",
                column.name
            ));
            writer.open(format!(
                "pub fn {}(&mut self, key: impl Into<String>)",
                key_setter(column)
            ));
            writer.line(format!("self.{key} = key.into();"));
            writer.line(format!("self.{field} = None;"));
            writer.close();
            writer.blank();

            writer.line(format!(
                "/// Row of sheet `{target}` the `{}` reference points at, once resolved.",
                column.name
            ));
            writer.line("#[must_use]");
            writer.open(format!(
                "pub fn {}<'a>(&self, database: &'a {database}) -> Option<&'a {}>",
                row_accessor(column),
                record_type(target)
            ));
            writer.line(format!(
                "self.{field}.and_then(|index| database.{}.get(index))",
                collection_field(target)
            ));
            writer.close();
        }

        let mut clear = Vec::new();
        for (column, _) in columns {
            match &column.column_type {
                ColumnType::Ref(_) => clear.push(format!("self.{} = None;", column_field(column))),
                ColumnType::List(_) => clear.push(format!("self.{}.clear();", column_field(column))),
                _ => {}
            }
        }
        if !clear.is_empty() {
            writer.blank();
            writer.line("/// Unsets every reference and empties every list.");
            writer.open("pub fn clear(&mut self)");
            writer.lines(&clear);
            writer.close();
        }

        if self.database.has_references(sheet) {
            writer.blank();
            writer.line("/// Resolves the pending keys of this row and of its nested rows.");
            writer.open(format!(
                "pub fn resolve_references(&mut self, keys: &{})",
                keys_type(self.config)
            ));
            for (column, _) in columns {
                let field = column_field(column);
                match &column.column_type {
                    ColumnType::Ref(target) => writer.line(format!(
                        "self.{field} = keys.{}.get(&self.{});",
                        collection_field(target),
                        pending_key_field(column)
                    )),
                    ColumnType::List(target) if self.nested_has_references(target) => {
                        writer.open(format!("for row in &mut self.{field}"));
                        writer.line("row.resolve_references(keys);");
                        writer.close();
                    }
                    _ => {}
                }
            }
            writer.close();
        }

        writer.close();
        writer.blank();
    }

    fn nested_has_references(&self, target: &str) -> bool {
        self.database
            .sheet(target)
            .is_some_and(|nested| self.database.has_references(nested))
    }

    fn generate_load_json(
        &self,
        writer: &mut CodeWriter,
        name: &str,
        columns: &[(&Column, FieldMapping)],
    ) {
        let rt = &self.config.runtime_path;
        let body: Vec<&String> = columns.iter().flat_map(|(_, m)| &m.json_load).collect();
        let param = if body.is_empty() { "_value" } else { "value" };

        writer.open(format!("impl {rt}::LoadJson for {name}"));
        writer.open(format!(
            "fn load_json(&mut self, {param}: &{rt}::JsonValue) -> {rt}::Result<()>"
        ));
        writer.lines(&body);
        writer.line("Ok(())");
        writer.close();
        writer.close();
        writer.blank();
    }

    fn generate_load_binary(
        &self,
        writer: &mut CodeWriter,
        name: &str,
        columns: &[(&Column, FieldMapping)],
    ) {
        let rt = &self.config.runtime_path;
        let body: Vec<&String> = columns.iter().flat_map(|(_, m)| &m.binary_load).collect();
        let param = if body.is_empty() { "_source" } else { "source" };

        writer.open(format!("impl {rt}::LoadBinary for {name}"));
        writer.open(format!(
            "fn load_binary(&mut self, {param}: &mut {rt}::Deserializer<'_>) -> {rt}::Result<()>"
        ));
        writer.lines(&body);
        writer.line("Ok(())");
        writer.close();
        writer.close();
        writer.blank();
    }

    fn generate_save_binary(
        &self,
        writer: &mut CodeWriter,
        name: &str,
        columns: &[(&Column, FieldMapping)],
    ) {
        let rt = &self.config.runtime_path;
        let body: Vec<&String> = columns.iter().flat_map(|(_, m)| &m.binary_save).collect();
        let param = if body.is_empty() { "_dest" } else { "dest" };

        writer.open(format!("impl {rt}::SaveBinary for {name}"));
        writer.open(format!(
            "fn save_binary(&self, {param}: &mut {rt}::Serializer) -> {rt}::Result<()>"
        ));
        writer.lines(&body);
        writer.line("Ok(())");
        writer.close();
        writer.close();
        writer.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinaryMode;

    fn database() -> Database {
        Database::new(vec![
            Sheet::new(
                "items",
                vec![
                    Column::new("id", ColumnType::UniqueIdentifier),
                    Column::new("upgrade", ColumnType::Ref("items".into())),
                    Column::new("icon", ColumnType::Image),
                ],
            ),
            Sheet::new(
                "monsters",
                vec![
                    Column::new("id", ColumnType::UniqueIdentifier),
                    Column::new("drops", ColumnType::List("monsters@drops".into())),
                ],
            ),
            Sheet::new(
                "monsters@drops",
                vec![
                    Column::new("item", ColumnType::Ref("items".into())),
                    Column::new("chance", ColumnType::Float),
                ],
            ),
            Sheet::new("empty", vec![]),
        ])
    }

    fn render(db: &Database, config: &GeneratorConfig) -> (String, Vec<Diagnostic>) {
        let mut writer = CodeWriter::new();
        let mut diagnostics = Vec::new();
        RecordGenerator::new(db, config)
            .generate(&mut writer, &mut diagnostics)
            .expect("Failed to generate records");
        (writer.finish(), diagnostics)
    }

    #[test]
    fn test_record_struct_and_accessors() {
        let db = database();
        let (code, _) = render(&db, &GeneratorConfig::default());

        assert!(code.contains("pub struct Items {\n    /// Column `id`.\n    pub id: String,\n"));
        assert!(code.contains("    upgrade_key: String,\n"));
        assert!(code.contains("pub fn upgrade_key(&self) -> &str {"));
        assert!(code.contains(
            "pub fn set_upgrade_key(&mut self, key: impl Into<String>) {\n        self.upgrade_key = key.into();\n        self.upgrade = None;\n    }"
        ));
        assert!(code.contains(
            "pub fn upgrade_row<'a>(&self, database: &'a GameDatabase) -> Option<&'a Items> {"
        ));
        assert!(code.contains("self.upgrade.and_then(|index| database.items.get(index))"));
        assert!(code.contains("pub const SHEET_NAME: &'static str = \"monsters@drops\";"));
    }

    #[test]
    fn test_unsupported_columns_are_reported() {
        let db = database();
        let (code, diagnostics) = render(&db, &GeneratorConfig::default());

        assert!(!code.contains("icon"));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::unsupported("items", "icon", "Image")]
        );
    }

    #[test]
    fn test_resolution_recurses_into_lists() {
        let db = database();
        let (code, _) = render(&db, &GeneratorConfig::default());

        assert!(code.contains("pub fn resolve_references(&mut self, keys: &GameDatabaseKeys) {"));
        assert!(code.contains("self.upgrade = keys.items.get(&self.upgrade_key);"));
        assert!(code.contains(
            "for row in &mut self.drops {\n            row.resolve_references(keys);\n        }"
        ));
        assert!(code.contains("self.drops.clear();"));
        assert!(code.contains("self.item = None;"));
    }

    #[test]
    fn test_channels_follow_binary_mode() {
        let db = database();

        let (code, _) = render(&db, &GeneratorConfig::default());
        assert!(code.contains("impl ::castledb_core::LoadJson for Items {"));
        assert!(!code.contains("LoadBinary for"));
        assert!(!code.contains("SaveBinary for"));

        let config = GeneratorConfig::default().with_binary_mode(BinaryMode::Only);
        let (code, _) = render(&db, &config);
        assert!(!code.contains("LoadJson for"));
        assert!(code.contains("impl ::castledb_core::LoadBinary for MonstersDrops {"));
        assert!(code.contains("impl ::castledb_core::SaveBinary for MonstersDrops {"));
    }

    #[test]
    fn test_empty_record_uses_unused_parameters() {
        let db = database();
        let config = GeneratorConfig::default().with_binary_mode(BinaryMode::On);
        let (code, _) = render(&db, &config);

        assert!(code.contains("pub struct Empty {\n}"));
        assert!(code.contains("fn load_json(&mut self, _value: &::castledb_core::JsonValue)"));
        assert!(code.contains("fn save_binary(&self, _dest: &mut ::castledb_core::Serializer)"));
    }

    #[test]
    fn test_inherit() {
        let db = database();
        let config = GeneratorConfig::default().with_inherit("crate::Row");
        let (code, _) = render(&db, &config);

        assert!(code.contains("impl crate::Row for Items {}"));
        assert!(code.contains("impl crate::Row for MonstersDrops {}"));
    }
}
