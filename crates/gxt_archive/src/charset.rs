//! Remapping of special characters onto private use code points.
//!
//! Localization patches draw characters the original fonts lack from their own glyph textures.
//! The text stores such a character as `U+E000 + glyph index` and the archive carries the list of
//! real code points, in glyph order, so it can be read back.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::CharsetBlock;

/// First code point used for remapped characters.
pub const PRIVATE_USE_START: u32 = 0xE000;

/// Number of code points in the Basic Multilingual Plane private use area.
pub const MAX_CHARACTERS: usize = 0x1900;

/// Glyph index to character mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterTable {
    chars: Vec<char>,
    glyphs: HashMap<char, u32>,
}

impl CharacterTable {
    /// Create a table assigning glyph indices to `chars` in iteration order.
    ///
    /// Duplicates keep their first index.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Result<Self> {
        let mut table = Self::default();
        for c in chars {
            if table.glyphs.contains_key(&c) {
                continue;
            }
            table.glyphs.insert(c, PRIVATE_USE_START + table.chars.len() as u32);
            table.chars.push(c);
        }

        if table.chars.len() > MAX_CHARACTERS {
            return Err(Error::TooManyCharacters(table.chars.len()));
        }

        Ok(table)
    }

    /// Rebuild a table from its on-disk block.
    pub fn from_block(block: &CharsetBlock) -> Result<Self> {
        let chars = block
            .code_points
            .iter()
            .map(|&cp| {
                char::from_u32(cp)
                    .ok_or_else(|| Error::corrupt(format!("invalid code point {cp:#X} in WCHR")))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(chars)
    }

    /// The on-disk block for this table.
    pub fn to_block(&self) -> CharsetBlock {
        CharsetBlock::new(self.chars.iter().map(|&c| c as u32).collect())
    }

    /// Number of remapped characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether no character is remapped.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The remapped characters in glyph order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Replace every remapped character in `text` by its private use code point.
    pub fn encode(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                self.glyphs
                    .get(&c)
                    .and_then(|&cp| char::from_u32(cp))
                    .unwrap_or(c)
            })
            .collect()
    }

    /// Replace every private use code point of this table in `text` by the real character.
    pub fn decode(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                (c as u32)
                    .checked_sub(PRIVATE_USE_START)
                    .and_then(|index| self.chars.get(index as usize))
                    .copied()
                    .unwrap_or(c)
            })
            .collect()
    }
}
