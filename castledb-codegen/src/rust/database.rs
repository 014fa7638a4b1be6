//! Aggregate database code generation.

use crate::config::GeneratorConfig;
use crate::rust::types::{collection_field, column_field, record_min_size, record_type};
use crate::writer::CodeWriter;
use castledb_schema::naming::type_ident;
use castledb_schema::{ColumnType, Database, Sheet};

/// Rust type name of the key tables built by the resolution pass.
#[must_use]
pub fn keys_type(config: &GeneratorConfig) -> String {
    format!("{}Keys", type_ident(&config.database_name))
}

/// Generator for the aggregate database type.
pub struct DatabaseGenerator<'a> {
    database: &'a Database,
    config: &'a GeneratorConfig,
}

impl<'a> DatabaseGenerator<'a> {
    /// Creates a new database generator.
    #[must_use]
    pub fn new(database: &'a Database, config: &'a GeneratorConfig) -> Self {
        Self { database, config }
    }

    /// Generates the key tables, the aggregate struct and its load/save
    /// implementations.
    pub fn generate(&self, writer: &mut CodeWriter) {
        let name = type_ident(&self.config.database_name);
        let sheets: Vec<&Sheet> = self.database.top_level_sheets().collect();
        let targets: Vec<&Sheet> = sheets
            .iter()
            .copied()
            .filter(|sheet| self.is_reference_target(sheet))
            .collect();

        if !targets.is_empty() {
            self.generate_keys(writer, &name, &targets);
        }
        self.generate_struct(writer, &name, &sheets);
        self.generate_impl(writer, &name, &sheets, !targets.is_empty());
        if self.config.binary_mode.emits_json() {
            self.generate_load_json(writer, &name, &sheets);
        }
        if self.config.binary_mode.emits_binary() {
            self.generate_load_binary(writer, &name, &sheets);
            self.generate_save_binary(writer, &name, &sheets);
        }
        if let Some(inherit) = &self.config.inherit {
            writer.line(format!("impl {inherit} for {name} {{}}"));
            writer.blank();
        }
    }

    fn is_reference_target(&self, target: &Sheet) -> bool {
        self.database.sheets.iter().any(|sheet| {
            sheet
                .columns
                .iter()
                .any(|column| matches!(&column.column_type, ColumnType::Ref(name) if *name == target.name))
        })
    }

    fn generate_keys(&self, writer: &mut CodeWriter, name: &str, targets: &[&Sheet]) {
        let rt = &self.config.runtime_path;
        let keys = keys_type(self.config);

        writer.line("/// Key lookup tables of the sheets targeted by references.");
        writer.line("#[derive(Debug, Clone, Default)]");
        writer.open(format!("pub struct {keys}"));
        for sheet in targets {
            writer.line(format!("/// Keys of sheet `{}`.", sheet.name));
            writer.line(format!(
                "pub {}: {rt}::KeyIndex,",
                collection_field(&sheet.name)
            ));
        }
        writer.close();
        writer.blank();

        writer.open(format!("impl {keys}"));
        writer.line("/// Indexes the key column of every referenced sheet in row order.");
        writer.line("#[must_use]");
        writer.open(format!("pub fn build(database: &{name}) -> Self"));
        writer.open("Self");
        for sheet in targets {
            let Some(key) = sheet.key_column() else {
                continue;
            };
            let collection = collection_field(&sheet.name);
            writer.line(format!(
                "{collection}: {rt}::KeyIndex::build(database.{collection}.iter().map(|row| row.{}.as_str())),",
                column_field(key)
            ));
        }
        writer.close();
        writer.close();
        writer.close();
        writer.blank();
    }

    fn generate_struct(&self, writer: &mut CodeWriter, name: &str, sheets: &[&Sheet]) {
        writer.line("/// Rows of every top-level sheet.");
        writer.line("#[derive(Debug, Clone, Default, PartialEq)]");
        writer.open(format!("pub struct {name}"));
        for sheet in sheets {
            writer.line(format!("/// Rows of sheet `{}`.", sheet.name));
            writer.line(format!(
                "pub {}: Vec<{}>,",
                collection_field(&sheet.name),
                record_type(&sheet.name)
            ));
        }
        writer.close();
        writer.blank();
    }

    fn generate_impl(
        &self,
        writer: &mut CodeWriter,
        name: &str,
        sheets: &[&Sheet],
        has_keys: bool,
    ) {
        writer.open(format!("impl {name}"));

        writer.line("/// Empties every collection.");
        writer.open("pub fn clear(&mut self)");
        for sheet in sheets {
            writer.line(format!("self.{}.clear();", collection_field(&sheet.name)));
        }
        writer.close();
        writer.blank();

        writer.line("/// Binds every pending reference key to the first row holding that key.");
        writer.line("///");
        writer.line("/// References whose key matches no row stay unset.");
        writer.open("pub fn resolve_references(&mut self)");
        if has_keys {
            writer.line(format!("let keys = {}::build(self);", keys_type(self.config)));
            for sheet in sheets {
                if !self.database.has_references(sheet) {
                    continue;
                }
                writer.open(format!("for row in &mut self.{}", collection_field(&sheet.name)));
                writer.line("row.resolve_references(&keys);");
                writer.close();
            }
        }
        writer.close();

        writer.close();
        writer.blank();
    }

    fn generate_load_json(&self, writer: &mut CodeWriter, name: &str, sheets: &[&Sheet]) {
        let rt = &self.config.runtime_path;

        writer.open(format!("impl {rt}::LoadJson for {name}"));
        writer.open(format!(
            "fn load_json(&mut self, value: &{rt}::JsonValue) -> {rt}::Result<()>"
        ));
        writer.open(format!("for sheet in {rt}::json::array(value, \"sheets\")?"));
        writer.line(format!("let name = {rt}::json::string(sheet, \"name\")?;"));
        writer.open("match name.as_str()");
        for sheet in sheets {
            writer.open(format!("{:?} =>", sheet.name));
            writer.open(format!("for line in {rt}::json::array(sheet, \"lines\")?"));
            writer.line(format!("let mut row = {}::default();", record_type(&sheet.name)));
            writer.line(format!("{rt}::LoadJson::load_json(&mut row, line)?;"));
            writer.line(format!("self.{}.push(row);", collection_field(&sheet.name)));
            writer.close();
            writer.close();
        }
        writer.line("_ => {}");
        writer.close();
        writer.close();
        writer.line("self.resolve_references();");
        writer.line("Ok(())");
        writer.close();
        writer.close();
        writer.blank();
    }

    fn generate_load_binary(&self, writer: &mut CodeWriter, name: &str, sheets: &[&Sheet]) {
        let rt = &self.config.runtime_path;
        let param = if sheets.is_empty() { "_source" } else { "source" };

        writer.open(format!("impl {rt}::LoadBinary for {name}"));
        writer.open(format!(
            "fn load_binary(&mut self, {param}: &mut {rt}::Deserializer<'_>) -> {rt}::Result<()>"
        ));
        for sheet in sheets {
            writer.open(format!(
                "for _ in 0..source.read_count_of({})?",
                record_min_size(sheet)
            ));
            writer.line(format!("let mut row = {}::default();", record_type(&sheet.name)));
            writer.line(format!("{rt}::LoadBinary::load_binary(&mut row, source)?;"));
            writer.line(format!("self.{}.push(row);", collection_field(&sheet.name)));
            writer.close();
        }
        writer.line("self.resolve_references();");
        writer.line("Ok(())");
        writer.close();
        writer.close();
        writer.blank();
    }

    fn generate_save_binary(&self, writer: &mut CodeWriter, name: &str, sheets: &[&Sheet]) {
        let rt = &self.config.runtime_path;
        let param = if sheets.is_empty() { "_dest" } else { "dest" };

        writer.open(format!("impl {rt}::SaveBinary for {name}"));
        writer.open(format!(
            "fn save_binary(&self, {param}: &mut {rt}::Serializer) -> {rt}::Result<()>"
        ));
        for sheet in sheets {
            let collection = collection_field(&sheet.name);
            writer.line(format!("dest.write_count(self.{collection}.len())?;"));
            writer.open(format!("for row in &self.{collection}"));
            writer.line(format!("{rt}::SaveBinary::save_binary(row, dest)?;"));
            writer.close();
        }
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
    use castledb_schema::Column;

    fn database() -> Database {
        Database::new(vec![
            Sheet::new(
                "items",
                vec![
                    Column::new("name", ColumnType::Text),
                    Column::new("code", ColumnType::UniqueIdentifier),
                ],
            ),
            Sheet::new(
                "monsters",
                vec![Column::new("drops", ColumnType::List("monsters@drops".into()))],
            ),
            Sheet::new(
                "monsters@drops",
                vec![Column::new("item", ColumnType::Ref("items".into()))],
            ),
        ])
    }

    fn render(db: &Database, config: &GeneratorConfig) -> String {
        let mut writer = CodeWriter::new();
        DatabaseGenerator::new(db, config).generate(&mut writer);
        writer.finish()
    }

    #[test]
    fn test_aggregate_holds_top_level_sheets() {
        let db = database();
        let code = render(&db, &GeneratorConfig::default().with_database_name("Data"));

        assert!(code.contains("pub struct Data {"));
        assert!(code.contains("pub items: Vec<Items>,"));
        assert!(code.contains("pub monsters: Vec<Monsters>,"));
        assert!(!code.contains("Vec<MonstersDrops>"));
    }

    #[test]
    fn test_keys_index_referenced_sheets_by_key_column() {
        let db = database();
        let code = render(&db, &GeneratorConfig::default());

        assert!(code.contains("pub struct GameDatabaseKeys {"));
        assert!(code.contains(
            "items: ::castledb_core::KeyIndex::build(database.items.iter().map(|row| row.code.as_str())),"
        ));
        assert!(!code.contains("pub monsters: ::castledb_core::KeyIndex"));
        assert!(code.contains("for row in &mut self.monsters {"));
        assert!(!code.contains("for row in &mut self.items {"));
    }

    #[test]
    fn test_without_references() {
        let db = Database::new(vec![Sheet::new(
            "items",
            vec![Column::new("id", ColumnType::UniqueIdentifier)],
        )]);
        let code = render(&db, &GeneratorConfig::default());

        assert!(!code.contains("Keys"));
        assert!(code.contains("pub fn resolve_references(&mut self) {\n    }"));
    }

    #[test]
    fn test_json_load_matches_sheets_by_name() {
        let db = database();
        let code = render(&db, &GeneratorConfig::default());

        assert!(code.contains("match name.as_str() {"));
        assert!(code.contains("\"items\" => {"));
        assert!(!code.contains("\"monsters@drops\" =>"));
        assert!(code.contains("self.resolve_references();"));
    }

    #[test]
    fn test_binary_channels_follow_declaration_order() {
        let db = database();
        let config = GeneratorConfig::default().with_binary_mode(BinaryMode::Only);
        let code = render(&db, &config);

        assert!(!code.contains("LoadJson for"));
        let items = code.find("dest.write_count(self.items.len())?;").expect("items");
        let monsters = code
            .find("dest.write_count(self.monsters.len())?;")
            .expect("monsters");
        assert!(items < monsters);
        assert!(code.contains("for _ in 0..source.read_count_of(8)? {"));
        assert!(code.contains("for _ in 0..source.read_count_of(4)? {"));
    }
}
