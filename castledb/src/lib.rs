//! # CastleDB
//!
//! Typed Rust code generation for CastleDB databases.
//!
//! A CastleDB `.cdb` document describes sheets of typed rows. This crate turns
//! the schema part of such a document into Rust records, enums, flags
//! constants and an aggregate database type, and provides the runtime the
//! generated code loads and saves through.
//!
//! ## Features
//!
//! - **Typed records** - One struct per sheet, nested list sheets included
//! - **JSON and binary channels** - Load the original document or a compact binary form
//! - **Reference resolution** - Keys become row indices once every sheet is loaded
//! - **Build script friendly** - Deterministic output, diagnostics for skipped columns
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! use castledb::codegen::{BinaryMode, GeneratorConfig, generate_from_file};
//!
//! let config = GeneratorConfig::new().with_binary_mode(BinaryMode::On);
//! let generated = generate_from_file("data/game.cdb".as_ref(), &config)?;
//! std::fs::write(out_dir.join("game.rs"), generated.code)?;
//!
//! // lib.rs
//! include!(concat!(env!("OUT_DIR"), "/game.rs"));
//! let database: GameDatabase = castledb::from_json_str(&text)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime buffers, channel traits, key index
//! - [`schema`] - `.cdb` schema parsing and validation
//! - [`codegen`] - Rust code generation from schemas

pub mod prelude;

/// Runtime support for generated code.
pub mod core {
    pub use castledb_core::*;
}

/// Schema parsing and validation.
pub mod schema {
    pub use castledb_schema::*;
}

/// Code generation from CastleDB schemas.
pub mod codegen {
    pub use castledb_codegen::*;
}

// Re-export commonly used items at the crate root
pub use castledb_core::{
    Color, Deserializer, KeyIndex, LoadBinary, LoadJson, SaveBinary, Serializer, from_bytes,
    from_json_str, from_json_value, to_bytes,
};

pub use castledb_codegen::{GeneratedCode, GeneratorConfig, generate_from_file, generate_from_json};
