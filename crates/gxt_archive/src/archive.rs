//! In-memory representation of a text archive.
//!
//! Comparing two archives with `==` ignores table and entry order, which is what a read after a
//! write reproduces: writers put tables and keys into the order the game expects.

use std::collections::BTreeSet;

use derive_more::derive::{Constructor, Deref, DerefMut, IntoIterator};
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::version::MAIN_TABLE;

/// Characters never reported by [`Archive::special_characters`], the game fonts already carry them.
const BUILTIN_SPECIAL_CHARACTERS: [char; 3] = ['\u{2122}', '\u{3000}', '\u{FEFF}'];

/// Key to text mapping of a single table, in insertion order.
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, IntoIterator)]
#[into_iterator(owned, ref, ref_mut)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Table(IndexMap<String, String>);

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Table name to [`Table`] mapping, in insertion order.
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, IntoIterator)]
#[into_iterator(owned, ref, ref_mut)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Archive(IndexMap<String, Table>);

impl<K: Into<String>> FromIterator<(K, Table)> for Archive {
    fn from_iter<T: IntoIterator<Item = (K, Table)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Outcome of [`Archive::merge`]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Keys that did not exist before
    pub added: usize,

    /// Existing keys whose text was replaced
    pub overwritten: usize,

    /// Keys present on both sides
    pub conflicts: usize,
}

impl Archive {
    /// An archive holding `table` as its `MAIN` table.
    pub fn single(table: Table) -> Self {
        Self(IndexMap::from([(MAIN_TABLE.to_string(), table)]))
    }

    /// Get a table, creating it empty when missing.
    pub fn table_mut(&mut self, name: &str) -> &mut Table {
        self.0.entry(name.to_string()).or_default()
    }

    /// Total number of entries over all tables.
    pub fn entry_count(&self) -> usize {
        self.0.values().map(|t| t.len()).sum()
    }

    /// Copy the entries of `other` into this archive.
    ///
    /// Keys that exist on both sides keep their current text unless `overwrite` is set.
    pub fn merge(&mut self, other: Archive, overwrite: bool) -> MergeStats {
        let mut stats = MergeStats::default();
        for (name, table) in other {
            let target = self.table_mut(&name);
            for (key, text) in table {
                match target.get_mut(&key) {
                    Some(current) => {
                        stats.conflicts += 1;
                        if overwrite {
                            *current = text;
                            stats.overwritten += 1;
                        }
                    }
                    None => {
                        target.insert(key, text);
                        stats.added += 1;
                    }
                }
            }
        }
        stats
    }

    /// Distinct characters above `threshold` used anywhere in the archive, in code point order.
    pub fn characters_above(&self, threshold: u32) -> BTreeSet<char> {
        self.0
            .values()
            .flat_map(|t| t.values())
            .flat_map(|text| text.chars())
            .filter(|c| *c as u32 > threshold)
            .collect()
    }

    /// Characters outside Latin-1 that need glyphs in a custom font, in code point order.
    pub fn special_characters(&self) -> Vec<char> {
        self.characters_above(0xFF)
            .into_iter()
            .filter(|c| !BUILTIN_SPECIAL_CHARACTERS.contains(c))
            .collect()
    }
}
