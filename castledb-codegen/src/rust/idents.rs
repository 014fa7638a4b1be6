//! Identifier collision checks.
//!
//! Distinct schema names can convert to the same Rust identifier
//! (`maxHp` and `max_hp`, a reference `mentor` and a text column
//! `mentorKey`). Emitting both would produce code that fails to compile, so
//! every generated name is claimed in its scope before anything is written.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::rust::database::keys_type;
use crate::rust::types::{
    ColumnMapping, TypeMapper, collection_field, enum_type, flags_module, key_setter,
    pending_key_field, record_type, row_accessor,
};
use castledb_schema::naming::type_ident;
use castledb_schema::{ColumnType, Database};
use std::collections::HashMap;

/// Prelude names the generated code refers to unqualified.
const PRELUDE_TYPES: &[&str] = &["String", "Vec", "Option", "Into"];

/// Identifiers declared in one Rust namespace, with what declared them.
#[derive(Debug, Default)]
struct Scope {
    claimed: HashMap<String, String>,
}

impl Scope {
    fn claim(&mut self, ident: String, origin: String) -> Result<(), CodegenError> {
        if let Some(first) = self.claimed.get(&ident) {
            return Err(CodegenError::DuplicateIdentifier {
                ident,
                first: first.clone(),
                second: origin,
            });
        }
        self.claimed.insert(ident, origin);
        Ok(())
    }
}

/// Checks that every identifier the generator would emit is unique in its
/// scope.
///
/// Scopes are the item namespace of the generated module, the fields and the
/// inherent members of each record, and the fields of the aggregate.
///
/// # Errors
/// Returns `CodegenError::DuplicateIdentifier` naming both sources of the
/// first collision, or `CodegenError::Schema` if a column cannot be mapped.
pub fn check_identifiers(
    database: &Database,
    config: &GeneratorConfig,
) -> Result<(), CodegenError> {
    let mapper = TypeMapper::new(database, config);
    let mut items = Scope::default();
    for name in PRELUDE_TYPES {
        items.claim((*name).to_string(), format!("prelude type `{name}`"))?;
    }

    for sheet in &database.sheets {
        items.claim(record_type(&sheet.name), format!("record of sheet `{}`", sheet.name))?;

        let mut fields = Scope::default();
        let mut members = Scope::default();
        members.claim("SHEET_NAME".to_string(), "constant `SHEET_NAME`".to_string())?;
        let mut clears = false;

        for column in &sheet.columns {
            let origin = format!("column `{}` of sheet `{}`", column.name, sheet.name);
            match &column.column_type {
                ColumnType::Enum(labels) if !labels.is_empty() => {
                    items.claim(enum_type(sheet, column), format!("enum of {origin}"))?;
                }
                ColumnType::Flags(_) => {
                    items.claim(flags_module(sheet, column), format!("flags of {origin}"))?;
                }
                _ => {}
            }

            let ColumnMapping::Mapped(mapping) = mapper.map(sheet, column)? else {
                continue;
            };
            for field in mapping.fields {
                fields.claim(field.ident, origin.clone())?;
            }
            match &column.column_type {
                ColumnType::Ref(_) => {
                    clears = true;
                    members.claim(pending_key_field(column), format!("key getter of {origin}"))?;
                    members.claim(key_setter(column), format!("key setter of {origin}"))?;
                    members.claim(row_accessor(column), format!("row accessor of {origin}"))?;
                }
                ColumnType::List(_) => clears = true,
                _ => {}
            }
        }

        if clears {
            members.claim("clear".to_string(), "method `clear`".to_string())?;
        }
        if database.has_references(sheet) {
            members.claim(
                "resolve_references".to_string(),
                "method `resolve_references`".to_string(),
            )?;
        }
    }

    items.claim(
        type_ident(&config.database_name),
        format!("database `{}`", config.database_name),
    )?;
    if database.sheets.iter().any(|sheet| sheet.has_ref_columns()) {
        items.claim(
            keys_type(config),
            format!("key tables of database `{}`", config.database_name),
        )?;
    }

    let mut collections = Scope::default();
    for sheet in database.top_level_sheets() {
        collections.claim(collection_field(&sheet.name), format!("rows of sheet `{}`", sheet.name))?;
    }

    Ok(())
}
