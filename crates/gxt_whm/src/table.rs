//! In-memory patch table and its view as a GXT [`Archive`].

use derive_more::derive::{Constructor, Deref, DerefMut, IntoIterator};
use gxt_archive::{
    archive::{Archive, Table},
    hash::{format_hash, gta4_hash, parse_hash},
    key::KeyRule,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Name of the single table a patch table is viewed as.
pub const PATCH_TABLE: &str = "whm_table";

/// One hash and its replacement text
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
    /// Hash of the text key
    pub hash: u32,

    /// The replacement text
    pub text: String,
}

impl PatchEntry {
    /// An entry for an already hashed key.
    pub fn new(hash: u32, text: impl Into<String>) -> Self {
        Self {
            hash,
            text: text.into(),
        }
    }

    /// An entry for `key`, which is either a `0x` hash or an identifier.
    ///
    /// Identifiers are hashed the way GTA IV hashes its text labels. Returns `None` for keys
    /// that are neither.
    pub fn from_key(key: &str, text: impl Into<String>) -> Option<Self> {
        let hash = match parse_hash(key) {
            Some(hash) => hash,
            None if KeyRule::Gta4.is_valid(key) => gta4_hash(key),
            None => return None,
        };
        Some(Self::new(hash, text))
    }
}

/// Entries of a patch table in file order
///
/// Order is kept as is on write and duplicate hashes are allowed.
#[derive(
    Constructor,
    Serialize,
    Deserialize,
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    Deref,
    DerefMut,
    IntoIterator,
)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct PatchTable(Vec<PatchEntry>);

impl FromIterator<PatchEntry> for PatchTable {
    fn from_iter<T: IntoIterator<Item = PatchEntry>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl PatchTable {
    /// View the entries as an archive with a single `whm_table` table keyed by `0x########`.
    ///
    /// A later entry with the same hash replaces the earlier one.
    pub fn to_archive(&self) -> Archive {
        let table: Table = self
            .iter()
            .map(|entry| (format_hash(entry.hash), entry.text.clone()))
            .collect();
        [(PATCH_TABLE, table)].into_iter().collect()
    }

    /// Collect the entries of every table of `archive`.
    ///
    /// `0x` keys are taken as hashes and identifiers are hashed with [`PatchEntry::from_key`].
    /// Any other key is skipped with a warning.
    pub fn from_archive(archive: &Archive) -> Self {
        archive
            .iter()
            .flat_map(|(name, table)| table.iter().map(move |(key, text)| (name, key, text)))
            .filter_map(|(name, key, text)| {
                let entry = PatchEntry::from_key(key, text.as_str());
                if entry.is_none() {
                    warn!("skipping {key:?} in {name}, it is neither a hash nor an identifier");
                }
                entry
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn archive_view() {
        let table = PatchTable::new(vec![
            PatchEntry::new(0xDEADBEEF, "Hello"),
            PatchEntry::new(1, "World"),
        ]);

        let archive = table.to_archive();
        assert_eq!(archive[PATCH_TABLE]["0xDEADBEEF"], "Hello");
        assert_eq!(archive[PATCH_TABLE]["0x00000001"], "World");

        assert_eq!(PatchTable::from_archive(&archive), table);
    }

    #[test]
    fn from_key_hashes_identifiers() {
        assert_eq!(
            PatchEntry::from_key("MAIN", "x"),
            Some(PatchEntry::new(0x27EB33D7, "x"))
        );
        assert_eq!(
            PatchEntry::from_key("0x0000000A", "ten"),
            Some(PatchEntry::new(10, "ten"))
        );
        assert_eq!(PatchEntry::from_key("no spaces", "x"), None);
    }

    #[traced_test]
    #[test]
    fn from_archive_hashes_names() {
        let archive = Archive::single(
            [("main", "m"), ("0x0000000A", "ten"), ("bad key", "x")]
                .into_iter()
                .collect(),
        );

        assert_eq!(
            PatchTable::from_archive(&archive),
            PatchTable::new(vec![
                PatchEntry::new(0x27EB33D7, "m"),
                PatchEntry::new(10, "ten"),
            ])
        );
        assert!(logs_contain("skipping \"bad key\" in MAIN"));
    }
}
