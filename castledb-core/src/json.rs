//! JSON accessors used by generated `load_json` implementations.
//!
//! Each accessor reads one named field of a row object. Loading trusts the
//! document to match the schema it was generated from, so a missing or
//! mistyped value is reported as an [`Error`] naming the field.

use crate::error::{Error, Result};
use serde_json::Value;

/// Returns the named field of a JSON object.
///
/// # Errors
/// Returns [`Error::MissingField`] if the field is absent.
pub fn field<'a>(value: &'a Value, name: &str) -> Result<&'a Value> {
    value.get(name).ok_or_else(|| Error::missing(name))
}

/// Reads a string field.
///
/// # Errors
/// Returns an error if the field is absent or not a string.
pub fn string(value: &Value, name: &str) -> Result<String> {
    field(value, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| Error::mismatch(name, "a string"))
}

/// Reads a boolean field.
///
/// # Errors
/// Returns an error if the field is absent or not a boolean.
pub fn boolean(value: &Value, name: &str) -> Result<bool> {
    field(value, name)?
        .as_bool()
        .ok_or_else(|| Error::mismatch(name, "a boolean"))
}

/// Reads a signed 32-bit integer field.
///
/// # Errors
/// Returns an error if the field is absent, not an integer, or out of range.
pub fn integer(value: &Value, name: &str) -> Result<i32> {
    field(value, name)?
        .as_i64()
        .and_then(|raw| i32::try_from(raw).ok())
        .ok_or_else(|| Error::mismatch(name, "a 32-bit integer"))
}

/// Reads an unsigned 32-bit integer field.
///
/// # Errors
/// Returns an error if the field is absent, not an unsigned integer, or out of range.
pub fn unsigned(value: &Value, name: &str) -> Result<u32> {
    field(value, name)?
        .as_u64()
        .and_then(|raw| u32::try_from(raw).ok())
        .ok_or_else(|| Error::mismatch(name, "an unsigned 32-bit integer"))
}

/// Reads a numeric field as an f32.
///
/// # Errors
/// Returns an error if the field is absent or not a number.
pub fn float(value: &Value, name: &str) -> Result<f32> {
    field(value, name)?
        .as_f64()
        .map(|raw| raw as f32)
        .ok_or_else(|| Error::mismatch(name, "a number"))
}

/// Reads an array field.
///
/// # Errors
/// Returns an error if the field is absent or not an array.
pub fn array<'a>(value: &'a Value, name: &str) -> Result<&'a [Value]> {
    field(value, name)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::mismatch(name, "an array"))
}

/// Reads an optional field with `read`, yielding the default value when the
/// field is absent or `null`.
///
/// # Errors
/// Returns whatever `read` returns for a present field.
pub fn optional<'a, T, F>(value: &'a Value, name: &str, read: F) -> Result<T>
where
    T: Default,
    F: FnOnce(&'a Value, &str) -> Result<T>,
{
    match value.get(name) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(_) => read(value, name),
    }
}
