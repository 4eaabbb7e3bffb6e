//! Ordered character sets
//!
//! The order of a character set is the contract with the consumer: index `i`
//! lands in cell `i` of the grid.

use serde::{Deserialize, Serialize};

use crate::{AtlasError, AtlasResult};

/// First printable ASCII character (space)
pub const ASCII_START: u32 = 32;
/// Last printable ASCII character (tilde)
pub const ASCII_END: u32 = 126;

/// Immutable, ordered sequence of characters to place in an atlas
///
/// Duplicates are allowed; each occurrence consumes a cell, and lookups
/// resolve to the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CharacterSet {
    chars: Vec<char>,
}

impl CharacterSet {
    /// Printable ASCII, space through tilde (95 characters)
    pub fn printable_ascii() -> Self {
        Self::from_code_points(ASCII_START..=ASCII_END)
    }

    /// Characters for an inclusive code point range
    ///
    /// Surrogate code points inside the range are skipped.
    pub fn from_range(start: u32, end: u32) -> AtlasResult<Self> {
        if start > end {
            return Err(AtlasError::InvalidConfig(format!(
                "Invalid character range {start:#x}..={end:#x}: start is after end"
            )));
        }
        Ok(Self::from_code_points(start..=end))
    }

    fn from_code_points(range: std::ops::RangeInclusive<u32>) -> Self {
        range.filter_map(char::from_u32).collect()
    }

    /// Number of characters, duplicates included
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the set has no characters
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at placement index
    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Iterate in placement order
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Characters as a slice
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// First placement index of `ch`
    pub fn position(&self, ch: char) -> Option<usize> {
        self.chars.iter().position(|&c| c == ch)
    }

    /// Whether any character occurs more than once
    pub fn has_duplicates(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.chars.len());
        !self.chars.iter().all(|c| seen.insert(*c))
    }
}

impl std::fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl From<&str> for CharacterSet {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl From<String> for CharacterSet {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<CharacterSet> for String {
    fn from(set: CharacterSet) -> Self {
        set.chars.into_iter().collect()
    }
}

impl FromIterator<char> for CharacterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self { chars: iter.into_iter().collect() }
    }
}
