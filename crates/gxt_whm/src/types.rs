//! Base types for structure of whm_table files.

use binrw::{BinRead, BinWrite};

/// Lookup entry of the index
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct WhmEntry {
    /// Hash of the text key
    pub hash: u32,

    /// Offset in bytes from the start of the text blob
    pub offset: u32,
}

/// Index that precedes the text blob
#[derive(BinRead, BinWrite, Debug, Default, Clone, PartialEq)]
#[brw(little)]
pub struct WhmHeader {
    /// Number of entries
    pub count: u32,

    /// The entries in file order
    #[br(count = count)]
    pub entries: Vec<WhmEntry>,

    /// The size in bytes of the text blob that follows
    pub blob_size: u32,
}

impl WhmHeader {
    /// Create a header describing `entries` and a blob of `blob_size` bytes.
    pub fn new(entries: Vec<WhmEntry>, blob_size: u32) -> Self {
        Self {
            count: entries.len() as u32,
            entries,
            blob_size,
        }
    }
}
