//! Enum and flags code generation.

use crate::rust::types::{enum_type, flags_module};
use crate::writer::CodeWriter;
use castledb_schema::naming::{to_screaming_snake_case, type_ident};
use castledb_schema::{Column, ColumnType, Database, Sheet};
use std::collections::HashSet;

/// Generator for enum types and flags constants.
pub struct EnumGenerator<'a> {
    database: &'a Database,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(database: &'a Database) -> Self {
        Self { database }
    }

    /// Generates the enum type of every enum column and the constants module
    /// of every flags column, in schema order.
    pub fn generate(&self, writer: &mut CodeWriter) {
        for sheet in &self.database.sheets {
            for column in &sheet.columns {
                match &column.column_type {
                    ColumnType::Enum(labels) if !labels.is_empty() => {
                        self.generate_enum(writer, sheet, column, labels);
                    }
                    ColumnType::Flags(labels) => {
                        self.generate_flags(writer, sheet, column, labels);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Generates an enum whose variants carry the label ordinals.
    fn generate_enum(
        &self,
        writer: &mut CodeWriter,
        sheet: &Sheet,
        column: &Column,
        labels: &[String],
    ) {
        let name = enum_type(sheet, column);
        let variants = unique_idents(labels, type_ident);

        writer.line(format!(
            "/// Labels of enum column `{}` in sheet `{}`.",
            column.name, sheet.name
        ));
        writer.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        writer.line("#[repr(i32)]");
        writer.open(format!("pub enum {name}"));
        for (ordinal, variant) in variants.iter().enumerate() {
            writer.line(format!("{variant} = {ordinal},"));
        }
        writer.close();
        writer.blank();

        writer.open(format!("impl {name}"));
        writer.line("/// Every label in declaration order.");
        let all: Vec<String> = variants.iter().map(|v| format!("Self::{v}")).collect();
        writer.line(format!(
            "pub const ALL: [Self; {}] = [{}];",
            variants.len(),
            all.join(", ")
        ));
        writer.blank();

        writer.line("/// Returns the ordinal stored in rows.");
        writer.line("#[must_use]");
        writer.open("pub const fn ordinal(self) -> i32");
        writer.line("self as i32");
        writer.close();
        writer.blank();

        writer.line("/// Returns the label with the given ordinal.");
        writer.line("#[must_use]");
        writer.open("pub const fn from_ordinal(ordinal: i32) -> Option<Self>");
        writer.open("match ordinal");
        for (ordinal, variant) in variants.iter().enumerate() {
            writer.line(format!("{ordinal} => Some(Self::{variant}),"));
        }
        writer.line("_ => None,");
        writer.close();
        writer.close();
        writer.blank();

        writer.line("/// Returns the label as written in the schema.");
        writer.line("#[must_use]");
        writer.open("pub const fn label(self) -> &'static str");
        writer.open("match self");
        for (variant, label) in variants.iter().zip(labels) {
            writer.line(format!("Self::{variant} => {label:?},"));
        }
        writer.close();
        writer.close();
        writer.close();
        writer.blank();
    }

    /// Generates a module with one bit constant per flag label.
    fn generate_flags(
        &self,
        writer: &mut CodeWriter,
        sheet: &Sheet,
        column: &Column,
        labels: &[String],
    ) {
        writer.line(format!(
            "/// Bits of flags column `{}` in sheet `{}`.",
            column.name, sheet.name
        ));
        writer.open(format!("pub mod {}", flags_module(sheet, column)));
        for (bit, constant) in unique_idents(labels, to_screaming_snake_case)
            .iter()
            .enumerate()
        {
            writer.line(format!("pub const {constant}: u32 = 1 << {bit};"));
        }
        writer.close();
        writer.blank();
    }
}

/// Converts labels to identifiers, suffixing the label position, or the next
/// free number after it, when a label converts to an identifier already taken.
fn unique_idents(labels: &[String], convert: fn(&str) -> String) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let ident = convert(label);
            if seen.insert(ident.clone()) {
                return ident;
            }
            let base = ident.trim_start_matches("r#");
            let mut suffix = index;
            loop {
                let suffixed = format!("{base}{suffix}");
                if seen.insert(suffixed.clone()) {
                    return suffixed;
                }
                suffix += 1;
            }
        })
        .collect()
}
