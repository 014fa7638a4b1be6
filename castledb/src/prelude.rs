//! Prelude module for convenient imports.
//!
//! ```ignore
//! use castledb::prelude::*;
//! ```

// Runtime types
pub use castledb_core::error::{Error as CoreError, Result as CoreResult};
pub use castledb_core::{
    Color, Deserializer, KeyIndex, LoadBinary, LoadJson, SaveBinary, Serializer, from_bytes,
    from_json_str, from_json_value, to_bytes,
};

// Schema types
pub use castledb_schema::{Column, ColumnType, Database, Sheet, parse_database, parse_file};

// Codegen types
pub use castledb_codegen::{
    BinaryMode, CodegenError, Diagnostic, GeneratedCode, Generator, GeneratorConfig,
};
