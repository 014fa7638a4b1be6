//! Non-fatal findings reported alongside generated code.

use std::fmt;

/// A column that was skipped because its type has no emitted representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Sheet declaring the column.
    pub sheet: String,
    /// Column name.
    pub column: String,
    /// Type name of the column.
    pub column_type: &'static str,
}

impl Diagnostic {
    /// Creates an unsupported column diagnostic.
    #[must_use]
    pub fn unsupported(
        sheet: impl Into<String>,
        column: impl Into<String>,
        column_type: &'static str,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            column: column.into(),
            column_type,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sheet '{}', column '{}': type {} is not supported, column skipped",
            self.sheet, self.column, self.column_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_sheet_and_column() {
        let diagnostic = Diagnostic::unsupported("items", "icon", "Image");
        assert_eq!(
            diagnostic.to_string(),
            "sheet 'items', column 'icon': type Image is not supported, column skipped"
        );
    }
}
