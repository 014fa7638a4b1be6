//! Encoder trait for the binary channel.
//!
//! This module provides the [`SaveBinary`] trait implemented by generated
//! records and databases.

use crate::buffer::Serializer;
use crate::error::Result;
use bytes::Bytes;

/// Trait for types that write themselves to the binary channel.
///
/// # Example
/// ```ignore
/// // Generated database usage
/// let mut dest = Serializer::new();
/// database.save_binary(&mut dest)?;
/// std::fs::write("game.bin", dest.as_slice())?;
/// ```
pub trait SaveBinary {
    /// Appends the binary encoding of `self` to `dest`.
    ///
    /// # Errors
    /// Returns an error if a string or collection is too long for its
    /// u32 length prefix.
    fn save_binary(&self, dest: &mut Serializer) -> Result<()>;
}

/// Encodes a value into a fresh buffer.
///
/// # Errors
/// Returns whatever [`SaveBinary::save_binary`] returns.
pub fn to_bytes<T: SaveBinary>(value: &T) -> Result<Bytes> {
    let mut dest = Serializer::new();
    value.save_binary(&mut dest)?;
    Ok(dest.freeze())
}
