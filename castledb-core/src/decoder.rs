//! Decoder traits for the JSON and binary channels.
//!
//! This module provides the [`LoadJson`] and [`LoadBinary`] traits
//! implemented by generated records and databases, plus helpers that load a
//! freshly constructed value.

use crate::buffer::Deserializer;
use crate::error::Result;
use serde_json::Value;

/// Trait for types loaded from a CastleDB JSON value.
///
/// Records load from one row object; databases load from the whole
/// document and resolve references once every sheet is loaded.
///
/// # Example
/// ```ignore
/// // Generated database usage
/// let text = std::fs::read_to_string("game.cdb")?;
/// let database: GameDatabase = from_json_str(&text)?;
/// ```
pub trait LoadJson {
    /// Loads `value` into `self`. List fields are appended to.
    ///
    /// # Errors
    /// Returns an error if a field the schema declares is missing or has
    /// the wrong JSON type.
    fn load_json(&mut self, value: &Value) -> Result<()>;
}

/// Trait for types loaded from the binary channel.
pub trait LoadBinary {
    /// Reads `self` from `source`. List fields are appended to.
    ///
    /// # Errors
    /// Returns an error if the input is truncated or holds invalid UTF-8.
    fn load_binary(&mut self, source: &mut Deserializer<'_>) -> Result<()>;
}

/// Loads a default-constructed value from a JSON value.
///
/// # Errors
/// Returns whatever [`LoadJson::load_json`] returns.
pub fn from_json_value<T: LoadJson + Default>(value: &Value) -> Result<T> {
    let mut loaded = T::default();
    loaded.load_json(value)?;
    Ok(loaded)
}

/// Parses a JSON document and loads a default-constructed value from it.
///
/// # Errors
/// Returns [`crate::Error::Json`] for malformed JSON, or whatever
/// [`LoadJson::load_json`] returns.
pub fn from_json_str<T: LoadJson + Default>(text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text)?;
    from_json_value(&value)
}

/// Loads a default-constructed value from binary input.
///
/// # Errors
/// Returns whatever [`LoadBinary::load_binary`] returns.
pub fn from_bytes<T: LoadBinary + Default>(input: &[u8]) -> Result<T> {
    let mut source = Deserializer::new(input);
    let mut loaded = T::default();
    loaded.load_binary(&mut source)?;
    Ok(loaded)
}
