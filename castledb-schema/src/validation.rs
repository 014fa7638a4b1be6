//! Schema validation utilities.
//!
//! This module checks the properties code generation relies on: related
//! sheets exist and are usable as reference targets, flags fit their bit
//! width, and names are unique where they become identifiers.

use crate::error::SchemaError;
use crate::types::{ColumnType, Database, Sheet};
use std::collections::HashSet;

/// Bit width of the unsigned value holding a flags column.
pub const MAX_FLAGS: usize = u32::BITS as usize;

/// Validates a parsed database for code generation.
///
/// # Arguments
/// * `database` - The database to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_database(database: &Database) -> Result<(), SchemaError> {
    let mut seen_sheets = HashSet::new();
    for sheet in &database.sheets {
        if !seen_sheets.insert(sheet.name.as_str()) {
            return Err(SchemaError::duplicate("sheet", &sheet.name, "database"));
        }
        validate_sheet(database, sheet)?;
    }
    Ok(())
}

/// Validates the columns of one sheet.
fn validate_sheet(database: &Database, sheet: &Sheet) -> Result<(), SchemaError> {
    let mut seen_columns = HashSet::new();

    for column in &sheet.columns {
        if !seen_columns.insert(column.name.as_str()) {
            return Err(SchemaError::duplicate("column", &column.name, &sheet.name));
        }

        match &column.column_type {
            ColumnType::Ref(target) => {
                let related = database
                    .sheet(target)
                    .ok_or_else(|| SchemaError::SheetNotFound {
                        sheet: sheet.name.clone(),
                        column: column.name.clone(),
                        target: target.clone(),
                    })?;
                if related.is_nested() {
                    return Err(SchemaError::NestedReference {
                        sheet: sheet.name.clone(),
                        column: column.name.clone(),
                        target: target.clone(),
                    });
                }
                if related.key.is_none() {
                    return Err(SchemaError::MissingKey {
                        sheet: sheet.name.clone(),
                        column: column.name.clone(),
                        target: target.clone(),
                    });
                }
            }
            ColumnType::List(target) => {
                if !database.has_sheet(target) {
                    return Err(SchemaError::SheetNotFound {
                        sheet: sheet.name.clone(),
                        column: column.name.clone(),
                        target: target.clone(),
                    });
                }
            }
            ColumnType::Flags(labels) => {
                if labels.len() > MAX_FLAGS {
                    return Err(SchemaError::TooManyFlags {
                        sheet: sheet.name.clone(),
                        column: column.name.clone(),
                        count: labels.len(),
                        max: MAX_FLAGS,
                    });
                }
                validate_labels(sheet, &column.name, labels)?;
            }
            ColumnType::Enum(labels) => validate_labels(sheet, &column.name, labels)?,
            _ => {}
        }
    }

    Ok(())
}

/// Validates that enum or flags labels are unique within their column.
fn validate_labels(sheet: &Sheet, column: &str, labels: &[String]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(SchemaError::duplicate(
                "label",
                label,
                format!("{}.{}", sheet.name, column),
            ));
        }
    }
    Ok(())
}
