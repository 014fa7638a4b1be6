//! Schema type definitions.
//!
//! This module contains the data structures representing a CastleDB
//! database: sheets, their columns, and the closed set of column types.

/// Marker separating the parent sheet and column in a nested sheet name.
pub const NESTED_SHEET_MARKER: char = '@';

/// Complete CastleDB database schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    /// Sheets in declaration order.
    pub sheets: Vec<Sheet>,
}

impl Database {
    /// Creates a database from its sheets.
    #[must_use]
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Looks up a sheet by name.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Returns true if a sheet with the given name exists.
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }

    /// Iterates the sheets exposed at the top level, in declaration order.
    pub fn top_level_sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter().filter(|sheet| !sheet.is_nested())
    }

    /// Returns true if rows of `sheet` hold at least one reference, either
    /// directly or through the nested sheets of its list columns.
    #[must_use]
    pub fn has_references(&self, sheet: &Sheet) -> bool {
        sheet.columns.iter().any(|column| match &column.column_type {
            ColumnType::Ref(_) => true,
            ColumnType::List(nested) => self
                .sheet(nested)
                .is_some_and(|nested| nested.name != sheet.name && self.has_references(nested)),
            _ => false,
        })
    }
}

/// One named table of typed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name. Nested sheets are named `parent@column`.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
    /// Index of the key column in `columns`, if the sheet has one.
    pub key: Option<usize>,
}

impl Sheet {
    /// Creates a sheet, designating its first unique identifier column as the key.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let key = columns
            .iter()
            .position(|column| column.column_type == ColumnType::UniqueIdentifier);
        Self {
            name: name.into(),
            columns,
            key,
        }
    }

    /// Returns true if the sheet is only reachable through a list column.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.name.contains(NESTED_SHEET_MARKER)
    }

    /// Returns the key column, if any.
    #[must_use]
    pub fn key_column(&self) -> Option<&Column> {
        self.key.and_then(|index| self.columns.get(index))
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Returns true if the sheet declares at least one reference column itself.
    #[must_use]
    pub fn has_ref_columns(&self) -> bool {
        self.columns
            .iter()
            .any(|column| matches!(column.column_type, ColumnType::Ref(_)))
    }

    /// Returns the name of the nested sheet backing a list column of this sheet.
    #[must_use]
    pub fn nested_sheet_name(&self, column: &str) -> String {
        format!("{}{}{}", self.name, NESTED_SHEET_MARKER, column)
    }
}

/// One typed field definition within a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, also the key of the value in each JSON row.
    pub name: String,
    /// Column type.
    pub column_type: ColumnType,
    /// Whether rows may omit the value.
    pub optional: bool,
}

impl Column {
    /// Creates a required column.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            optional: false,
        }
    }

    /// Marks the column as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Column type variants.
///
/// The numeric identifiers are the ones CastleDB writes in `typeStr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Unique row identifier (0).
    UniqueIdentifier,
    /// Free text (1).
    Text,
    /// Boolean (2).
    Boolean,
    /// 32-bit integer (3).
    Integer,
    /// 32-bit float (4).
    Float,
    /// Enumeration with its labels in declaration order (5).
    Enum(Vec<String>),
    /// Reference to a row of the named sheet (6).
    Ref(String),
    /// Image (7).
    Image,
    /// List of rows of the named nested sheet (8).
    List(String),
    /// Custom type with its type name (9).
    Custom(String),
    /// Bit flags with their labels in declaration order (10).
    Flags(Vec<String>),
    /// Packed RGB color (11).
    Color,
    /// Layer over the named sheet (12).
    Layer(String),
    /// File path (13).
    File,
    /// Tile position (14).
    TilePos,
    /// Tile layer (15).
    TileLayer,
    /// Dynamic JSON value (16).
    Dynamic,
}

impl ColumnType {
    /// Returns the CastleDB numeric type identifier.
    #[must_use]
    pub const fn type_id(&self) -> u8 {
        match self {
            Self::UniqueIdentifier => 0,
            Self::Text => 1,
            Self::Boolean => 2,
            Self::Integer => 3,
            Self::Float => 4,
            Self::Enum(_) => 5,
            Self::Ref(_) => 6,
            Self::Image => 7,
            Self::List(_) => 8,
            Self::Custom(_) => 9,
            Self::Flags(_) => 10,
            Self::Color => 11,
            Self::Layer(_) => 12,
            Self::File => 13,
            Self::TilePos => 14,
            Self::TileLayer => 15,
            Self::Dynamic => 16,
        }
    }

    /// Returns the type name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UniqueIdentifier => "UniqueIdentifier",
            Self::Text => "Text",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Enum(_) => "Enum",
            Self::Ref(_) => "Ref",
            Self::Image => "Image",
            Self::List(_) => "List",
            Self::Custom(_) => "Custom",
            Self::Flags(_) => "Flags",
            Self::Color => "Color",
            Self::Layer(_) => "Layer",
            Self::File => "File",
            Self::TilePos => "TilePos",
            Self::TileLayer => "TileLayer",
            Self::Dynamic => "Dynamic",
        }
    }

    /// Returns the name of the related sheet for reference and list columns.
    #[must_use]
    pub fn related_sheet(&self) -> Option<&str> {
        match self {
            Self::Ref(sheet) | Self::List(sheet) => Some(sheet),
            _ => None,
        }
    }

    /// Returns the labels of enum and flags columns.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            Self::Enum(labels) | Self::Flags(labels) => Some(labels),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Database {
        Database::new(vec![
            Sheet::new(
                "items",
                vec![
                    Column::new("name", ColumnType::Text),
                    Column::new("id", ColumnType::UniqueIdentifier),
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
                vec![Column::new("item", ColumnType::Ref("items".into()))],
            ),
        ])
    }

    #[test]
    fn test_key_is_first_unique_identifier() {
        let db = sample();
        let items = db.sheet("items").expect("items");
        assert_eq!(items.key, Some(1));
        assert_eq!(items.key_column().map(|c| c.name.as_str()), Some("id"));
        assert!(db.sheet("monsters@drops").expect("drops").key.is_none());
    }

    #[test]
    fn test_nested_sheets_are_hidden_from_top_level() {
        let db = sample();
        let names: Vec<_> = db.top_level_sheets().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["items", "monsters"]);
        assert!(db.sheet("monsters@drops").expect("drops").is_nested());
    }

    #[test]
    fn test_references_through_lists() {
        let db = sample();
        let monsters = db.sheet("monsters").expect("monsters");
        assert!(!monsters.has_ref_columns());
        assert!(db.has_references(monsters));
        assert!(!db.has_references(db.sheet("items").expect("items")));
    }

    #[test]
    fn test_nested_sheet_name() {
        let db = sample();
        let monsters = db.sheet("monsters").expect("monsters");
        assert_eq!(monsters.nested_sheet_name("drops"), "monsters@drops");
    }

    #[test]
    fn test_column_type_metadata() {
        let column_type = ColumnType::Flags(vec!["a".into(), "b".into()]);
        assert_eq!(column_type.type_id(), 10);
        assert_eq!(column_type.name(), "Flags");
        assert_eq!(column_type.labels().map(<[String]>::len), Some(2));
        assert_eq!(ColumnType::Ref("x".into()).related_sheet(), Some("x"));
        assert_eq!(ColumnType::Text.related_sheet(), None);
    }
}
