//! Value types shared by generated records.
//!
//! This module provides the [`Color`] column value and the [`KeyIndex`]
//! lookup table used by the reference resolution pass.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Packed `0xRRGGBB` color as stored by CastleDB color columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// Creates a color from its packed value.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Creates a color from its red, green and blue components.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Returns the packed value.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Returns the red component.
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Returns the green component.
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        value.0
    }
}

/// Maps the key column values of one sheet to row indices.
///
/// When several rows share a key the first one wins, matching a scan of
/// the collection in row order. An empty key never matches.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    rows: HashMap<String, usize>,
}

impl KeyIndex {
    /// Builds an index from key values given in row order.
    pub fn build<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rows = HashMap::new();
        for (index, key) in keys.into_iter().enumerate() {
            if let Entry::Vacant(slot) = rows.entry(key.to_owned()) {
                slot.insert(index);
            }
        }
        Self { rows }
    }

    /// Returns the index of the first row whose key equals `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        self.rows.get(key).copied()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no keys are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
