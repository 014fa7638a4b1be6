//! Binary channel buffers used by generated `load_binary`/`save_binary` code.
//!
//! This module provides:
//! - [`Serializer`] for appending values to a growable buffer
//! - [`Deserializer`] for reading values back from a byte slice
//!
//! All multi-byte values use little-endian byte order. Strings and
//! collections are prefixed with their length as a `u32`.

use crate::error::{Error, Result};
use crate::types::Color;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Growable little-endian writer.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    buffer: BytesMut,
}

impl Serializer {
    /// Creates an empty serializer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a serializer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the written bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the serializer, returning the written bytes.
    #[must_use]
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Consumes the serializer, returning the written bytes as a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Writes a boolean as a single byte.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buffer.put_u8(u8::from(value));
    }

    /// Writes an i32.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.put_i32_le(value);
    }

    /// Writes a u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.buffer.put_u32_le(value);
    }

    /// Writes an f32.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buffer.put_f32_le(value);
    }

    /// Writes a color as its packed u32 value.
    #[inline]
    pub fn write_color(&mut self, value: Color) {
        self.buffer.put_u32_le(value.to_u32());
    }

    /// Writes an element count as a u32.
    ///
    /// # Errors
    /// Returns [`Error::CountOverflow`] if `count` does not fit in a u32.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| Error::CountOverflow { count })?;
        self.buffer.put_u32_le(count);
        Ok(())
    }

    /// Writes a string as a u32 byte length followed by its UTF-8 bytes.
    ///
    /// # Errors
    /// Returns [`Error::CountOverflow`] if the string is longer than `u32::MAX` bytes.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_count(value.len())?;
        self.buffer.put_slice(value.as_bytes());
        Ok(())
    }
}

/// Cursor reading values written by a [`Serializer`].
///
/// Every read checks the remaining length first, so truncated input yields
/// [`Error::UnexpectedEof`] instead of a panic.
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    remaining: &'a [u8],
    position: usize,
}

impl<'a> Deserializer<'a> {
    /// Wraps a byte slice for reading.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            remaining: input,
            position: 0,
        }
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Returns true if all input has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn ensure(&self, required: usize) -> Result<()> {
        if self.remaining.len() < required {
            return Err(Error::UnexpectedEof {
                required,
                available: self.remaining.len(),
            });
        }
        Ok(())
    }

    /// Reads a boolean byte. Any non-zero value is `true`.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if the input is exhausted.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.ensure(1)?;
        self.position += 1;
        Ok(self.remaining.get_u8() != 0)
    }

    /// Reads an i32.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        self.position += 4;
        Ok(self.remaining.get_i32_le())
    }

    /// Reads a u32.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        self.position += 4;
        Ok(self.remaining.get_u32_le())
    }

    /// Reads an f32.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        self.position += 4;
        Ok(self.remaining.get_f32_le())
    }

    /// Reads a packed color.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_color(&mut self) -> Result<Color> {
        self.read_u32().map(Color::from_u32)
    }

    /// Reads a u32 element count.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_count(&mut self) -> Result<usize> {
        self.read_u32().map(|count| count as usize)
    }

    /// Reads a u32 element count for elements encoded in at least
    /// `min_size` bytes each.
    ///
    /// A count the remaining input cannot hold is rejected before any element
    /// is read. Elements with a zero minimum size carry no bytes to check
    /// against, so their count is returned as read.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if fewer than 4 bytes remain, or
    /// [`Error::CountExceedsInput`] if `count * min_size` exceeds the
    /// remaining input.
    pub fn read_count_of(&mut self, min_size: usize) -> Result<usize> {
        let count = self.read_count()?;
        if min_size > 0 && count.saturating_mul(min_size) > self.remaining.len() {
            return Err(Error::CountExceedsInput {
                count,
                min_size,
                available: self.remaining.len(),
            });
        }
        Ok(count)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedEof`] if the input is truncated, or
    /// [`Error::InvalidUtf8`] if the payload is not valid UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_count()?;
        self.ensure(len)?;
        let offset = self.position;
        let (bytes, rest) = self.remaining.split_at(len);
        let value = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { offset })?;
        self.remaining = rest;
        self.position += len;
        Ok(value.to_owned())
    }
}
