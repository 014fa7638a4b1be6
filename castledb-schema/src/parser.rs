//! CastleDB document parser.
//!
//! This module reads the schema part of a CastleDB `.cdb` JSON document
//! (sheet names and column definitions) into the internal representation.
//! Row data (`lines`) is left to the generated loaders.

use crate::error::ParseError;
use crate::types::{Column, ColumnType, Database, Sheet};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawDatabase {
    sheets: Vec<RawSheet>,
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    name: String,
    #[serde(default)]
    columns: Vec<RawColumn>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    name: String,
    #[serde(rename = "typeStr")]
    type_str: String,
    #[serde(default)]
    opt: bool,
}

/// Parses a CastleDB database schema from a JSON string.
///
/// # Arguments
/// * `json` - `.cdb` document content
///
/// # Returns
/// Parsed database or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or a column type is invalid.
pub fn parse_database(json: &str) -> Result<Database, ParseError> {
    let raw: RawDatabase = serde_json::from_str(json)?;
    let mut sheets = Vec::with_capacity(raw.sheets.len());

    for raw_sheet in raw.sheets {
        let mut columns = Vec::with_capacity(raw_sheet.columns.len());
        for raw_column in raw_sheet.columns {
            let column_type = parse_column_type(&raw_sheet.name, &raw_column)?;
            columns.push(Column {
                name: raw_column.name,
                column_type,
                optional: raw_column.opt,
            });
        }
        sheets.push(Sheet::new(raw_sheet.name, columns));
    }

    Ok(Database::new(sheets))
}

/// Parses a CastleDB database schema from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_file(path: &Path) -> Result<Database, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_database(&json)
}

/// Parses a `typeStr` of the form `id` or `id:payload`.
fn parse_column_type(sheet: &str, column: &RawColumn) -> Result<ColumnType, ParseError> {
    let (id, payload) = match column.type_str.split_once(':') {
        Some((id, payload)) => (id, Some(payload)),
        None => (column.type_str.as_str(), None),
    };

    let type_id: u32 = id.trim().parse().map_err(|_| ParseError::InvalidType {
        sheet: sheet.to_string(),
        column: column.name.clone(),
        value: column.type_str.clone(),
    })?;

    let require_payload = || {
        payload.map(str::to_string).ok_or_else(|| ParseError::MissingPayload {
            sheet: sheet.to_string(),
            column: column.name.clone(),
            type_id,
        })
    };

    let column_type = match type_id {
        0 => ColumnType::UniqueIdentifier,
        1 => ColumnType::Text,
        2 => ColumnType::Boolean,
        3 => ColumnType::Integer,
        4 => ColumnType::Float,
        5 => ColumnType::Enum(split_labels(&require_payload()?)),
        6 => ColumnType::Ref(require_payload()?),
        7 => ColumnType::Image,
        8 => ColumnType::List(format!("{sheet}@{}", column.name)),
        9 => ColumnType::Custom(require_payload()?),
        10 => ColumnType::Flags(split_labels(&require_payload()?)),
        11 => ColumnType::Color,
        12 => ColumnType::Layer(require_payload()?),
        13 => ColumnType::File,
        14 => ColumnType::TilePos,
        15 => ColumnType::TileLayer,
        16 => ColumnType::Dynamic,
        _ => {
            return Err(ParseError::UnknownTypeId {
                sheet: sheet.to_string(),
                column: column.name.clone(),
                type_id,
            });
        }
    };

    Ok(column_type)
}

fn split_labels(payload: &str) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }
    payload.split(',').map(str::to_string).collect()
}
