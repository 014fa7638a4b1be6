//! Column type mapping.
//!
//! The [`TypeMapper`] is the single place that knows how each column type is
//! declared, read from JSON, read from binary and written to binary. Record
//! emission only stitches the fragments together.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use castledb_schema::naming::{escape_keyword, field_ident, to_snake_case, type_ident};
use castledb_schema::{Column, ColumnType, Database, SchemaError, Sheet};

/// Rust field name of a column.
#[must_use]
pub fn column_field(column: &Column) -> String {
    field_ident(&column.name)
}

/// Name of the private field holding the pending key of a reference column.
#[must_use]
pub fn pending_key_field(column: &Column) -> String {
    escape_keyword(format!("{}_key", to_snake_case(&column.name)))
}

/// Name of the method replacing the pending key of a reference column.
#[must_use]
pub fn key_setter(column: &Column) -> String {
    format!("set_{}_key", to_snake_case(&column.name))
}

/// Name of the accessor returning the row a reference column points at.
#[must_use]
pub fn row_accessor(column: &Column) -> String {
    escape_keyword(format!("{}_row", to_snake_case(&column.name)))
}

/// Rust type name of the record generated for a sheet.
#[must_use]
pub fn record_type(sheet_name: &str) -> String {
    type_ident(sheet_name)
}

/// Field of the aggregate holding the rows of a top-level sheet.
#[must_use]
pub fn collection_field(sheet_name: &str) -> String {
    field_ident(sheet_name)
}

/// Rust type name of the enum generated for an enum column.
#[must_use]
pub fn enum_type(sheet: &Sheet, column: &Column) -> String {
    type_ident(&format!("{} {}", sheet.name, column.name))
}

/// Module holding the bit constants of a flags column.
#[must_use]
pub fn flags_module(sheet: &Sheet, column: &Column) -> String {
    field_ident(&format!("{} {}", sheet.name, column.name))
}

/// Fewest bytes one value of `column_type` takes on the binary channel.
///
/// Strings, keys and lists contribute their u32 length prefix. Columns with no
/// emitted representation contribute nothing.
#[must_use]
pub fn binary_min_size(column_type: &ColumnType) -> usize {
    match column_type {
        ColumnType::Boolean => 1,
        ColumnType::UniqueIdentifier
        | ColumnType::Text
        | ColumnType::File
        | ColumnType::Integer
        | ColumnType::Enum(_)
        | ColumnType::Flags(_)
        | ColumnType::Float
        | ColumnType::Color
        | ColumnType::Ref(_)
        | ColumnType::List(_) => 4,
        ColumnType::Image
        | ColumnType::Custom(_)
        | ColumnType::Layer(_)
        | ColumnType::TilePos
        | ColumnType::TileLayer
        | ColumnType::Dynamic => 0,
    }
}

/// Fewest bytes one record of `sheet` takes on the binary channel.
///
/// Bounds the element counts read back by generated `load_binary` code.
#[must_use]
pub fn record_min_size(sheet: &Sheet) -> usize {
    sheet
        .columns
        .iter()
        .map(|column| binary_min_size(&column.column_type))
        .sum()
}

/// One field declaration of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Doc comment text, if the field is documented.
    pub doc: Option<String>,
    /// Field identifier.
    pub ident: String,
    /// Field type.
    pub rust_type: String,
    /// Whether the field is public.
    pub public: bool,
}

impl FieldDecl {
    /// Renders the declaration lines.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if let Some(doc) = &self.doc {
            lines.push(format!("/// {doc}"));
        }
        let visibility = if self.public { "pub " } else { "" };
        lines.push(format!("{visibility}{}: {},", self.ident, self.rust_type));
        lines
    }
}

/// Emitted fragments for one supported column.
///
/// Statement fragments are relative to the body of the method they land in
/// and may span several lines with their own inner indentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field declarations, usually one.
    pub fields: Vec<FieldDecl>,
    /// Statements reading the column from a JSON row named `value`.
    pub json_load: Vec<String>,
    /// Statements reading the column from a deserializer named `source`.
    pub binary_load: Vec<String>,
    /// Statements writing the column to a serializer named `dest`.
    pub binary_save: Vec<String>,
}

/// Result of mapping one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMapping {
    /// Column has an emitted representation.
    Mapped(FieldMapping),
    /// Column type has no emitted representation and is skipped.
    Unsupported,
}

/// Fixed-size or string column value handled by a single runtime call.
struct Scalar {
    rust_type: &'static str,
    json: &'static str,
    read: &'static str,
    write: &'static str,
    by_ref: bool,
}

const STRING: Scalar = Scalar {
    rust_type: "String",
    json: "string",
    read: "read_string",
    write: "write_string",
    by_ref: true,
};

const BOOLEAN: Scalar = Scalar {
    rust_type: "bool",
    json: "boolean",
    read: "read_bool",
    write: "write_bool",
    by_ref: false,
};

const INTEGER: Scalar = Scalar {
    rust_type: "i32",
    json: "integer",
    read: "read_i32",
    write: "write_i32",
    by_ref: false,
};

const UNSIGNED: Scalar = Scalar {
    rust_type: "u32",
    json: "unsigned",
    read: "read_u32",
    write: "write_u32",
    by_ref: false,
};

const FLOAT: Scalar = Scalar {
    rust_type: "f32",
    json: "float",
    read: "read_f32",
    write: "write_f32",
    by_ref: false,
};

/// Maps column types to emitted fragments.
pub struct TypeMapper<'a> {
    database: &'a Database,
    config: &'a GeneratorConfig,
}

impl<'a> TypeMapper<'a> {
    /// Creates a new type mapper.
    #[must_use]
    pub fn new(database: &'a Database, config: &'a GeneratorConfig) -> Self {
        Self { database, config }
    }

    /// Maps one column of `sheet`.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if a reference or list column names a
    /// sheet that cannot back it.
    pub fn map(&self, sheet: &Sheet, column: &Column) -> Result<ColumnMapping, CodegenError> {
        let mapping = match &column.column_type {
            ColumnType::UniqueIdentifier | ColumnType::Text | ColumnType::File => {
                self.scalar(column, &STRING)
            }
            ColumnType::Boolean => self.scalar(column, &BOOLEAN),
            ColumnType::Integer | ColumnType::Enum(_) => self.scalar(column, &INTEGER),
            ColumnType::Flags(_) => self.scalar(column, &UNSIGNED),
            ColumnType::Float => self.scalar(column, &FLOAT),
            ColumnType::Color => self.color(column),
            ColumnType::Ref(target) => self.reference(sheet, column, target)?,
            ColumnType::List(target) => self.list(sheet, column, target)?,
            ColumnType::Image
            | ColumnType::Custom(_)
            | ColumnType::Layer(_)
            | ColumnType::TilePos
            | ColumnType::TileLayer
            | ColumnType::Dynamic => return Ok(ColumnMapping::Unsupported),
        };
        Ok(ColumnMapping::Mapped(mapping))
    }

    fn runtime(&self) -> &str {
        &self.config.runtime_path
    }

    /// Expression reading `column` from the JSON row with `reader`.
    fn json_read(&self, column: &Column, reader: &str) -> String {
        let rt = self.runtime();
        if column.optional {
            format!(
                "{rt}::json::optional(value, {:?}, {rt}::json::{reader})?",
                column.name
            )
        } else {
            format!("{rt}::json::{reader}(value, {:?})?", column.name)
        }
    }

    fn doc(column: &Column) -> Option<String> {
        Some(format!("Column `{}`.", column.name))
    }

    fn scalar(&self, column: &Column, scalar: &Scalar) -> FieldMapping {
        let field = column_field(column);
        let save = if scalar.by_ref {
            format!("dest.{}(&self.{field})?;", scalar.write)
        } else {
            format!("dest.{}(self.{field});", scalar.write)
        };

        FieldMapping {
            fields: vec![FieldDecl {
                doc: Self::doc(column),
                ident: field.clone(),
                rust_type: scalar.rust_type.to_string(),
                public: true,
            }],
            json_load: vec![format!(
                "self.{field} = {};",
                self.json_read(column, scalar.json)
            )],
            binary_load: vec![format!("self.{field} = source.{}()?;", scalar.read)],
            binary_save: vec![save],
        }
    }

    fn color(&self, column: &Column) -> FieldMapping {
        let rt = self.runtime();
        let field = column_field(column);

        FieldMapping {
            fields: vec![FieldDecl {
                doc: Self::doc(column),
                ident: field.clone(),
                rust_type: format!("{rt}::Color"),
                public: true,
            }],
            json_load: vec![format!(
                "self.{field} = {rt}::Color::from_u32({});",
                self.json_read(column, "unsigned")
            )],
            binary_load: vec![format!("self.{field} = source.read_color()?;")],
            binary_save: vec![format!("dest.write_color(self.{field});")],
        }
    }

    fn reference(
        &self,
        sheet: &Sheet,
        column: &Column,
        target: &str,
    ) -> Result<FieldMapping, CodegenError> {
        let related = self.database.sheet(target).ok_or_else(|| SchemaError::SheetNotFound {
            sheet: sheet.name.clone(),
            column: column.name.clone(),
            target: target.to_string(),
        })?;
        if related.key.is_none() {
            return Err(SchemaError::MissingKey {
                sheet: sheet.name.clone(),
                column: column.name.clone(),
                target: target.to_string(),
            }
            .into());
        }

        let field = column_field(column);
        let key = pending_key_field(column);
        let database = type_ident(&self.config.database_name);

        Ok(FieldMapping {
            fields: vec![
                FieldDecl {
                    doc: Some(format!(
                        "Column `{}`: index into `{database}::{}` once resolved.",
                        column.name,
                        collection_field(target)
                    )),
                    ident: field.clone(),
                    rust_type: "Option<usize>".to_string(),
                    public: true,
                },
                FieldDecl {
                    doc: None,
                    ident: key.clone(),
                    rust_type: "String".to_string(),
                    public: false,
                },
            ],
            json_load: vec![format!("self.{key} = {};", self.json_read(column, "string"))],
            binary_load: vec![format!("self.{key} = source.read_string()?;")],
            binary_save: vec![format!(
                "dest.write_string(if self.{field}.is_some() {{ self.{key}.as_str() }} else {{ \"\" }})?;"
            )],
        })
    }

    fn list(
        &self,
        sheet: &Sheet,
        column: &Column,
        target: &str,
    ) -> Result<FieldMapping, CodegenError> {
        let related = self.database.sheet(target).ok_or_else(|| SchemaError::SheetNotFound {
            sheet: sheet.name.clone(),
            column: column.name.clone(),
            target: target.to_string(),
        })?;

        let rt = self.runtime();
        let field = column_field(column);
        let element = record_type(target);

        Ok(FieldMapping {
            fields: vec![FieldDecl {
                doc: Self::doc(column),
                ident: field.clone(),
                rust_type: format!("Vec<{element}>"),
                public: true,
            }],
            json_load: vec![
                format!("for element in {} {{", self.json_read(column, "array")),
                format!("    let mut row = {element}::default();"),
                format!("    {rt}::LoadJson::load_json(&mut row, element)?;"),
                format!("    self.{field}.push(row);"),
                "}".to_string(),
            ],
            binary_load: vec![
                format!(
                    "for _ in 0..source.read_count_of({})? {{",
                    record_min_size(related)
                ),
                format!("    let mut row = {element}::default();"),
                format!("    {rt}::LoadBinary::load_binary(&mut row, source)?;"),
                format!("    self.{field}.push(row);"),
                "}".to_string(),
            ],
            binary_save: vec![
                format!("dest.write_count(self.{field}.len())?;"),
                format!("for row in &self.{field} {{"),
                format!("    {rt}::SaveBinary::save_binary(row, dest)?;"),
                "}".to_string(),
            ],
        })
    }
}
