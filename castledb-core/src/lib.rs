//! # CastleDB Core
//!
//! Runtime support for code generated from CastleDB databases.
//!
//! This crate provides:
//! - Binary channel buffers ([`Serializer`], [`Deserializer`])
//! - JSON field accessors for generated loaders
//! - Load/save traits implemented by generated records and databases
//! - Key lookup tables for the reference resolution pass
//! - Error types for loading and saving

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod types;

pub use buffer::{Deserializer, Serializer};
pub use decoder::{LoadBinary, LoadJson, from_bytes, from_json_str, from_json_value};
pub use encoder::{SaveBinary, to_bytes};
pub use error::{Error, Result};
pub use types::{Color, KeyIndex};

/// Re-exported so generated code and its callers agree on the JSON value type.
pub use serde_json::Value as JsonValue;
