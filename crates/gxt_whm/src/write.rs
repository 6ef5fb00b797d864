//! Writing whm_table files
//!

use std::{io::Cursor, path::Path};

use binrw::BinWrite;
use tracing::{debug, instrument};

use crate::{
    error::Result,
    table::PatchTable,
    types::{WhmEntry, WhmHeader},
};

/// Serialize `table`, keeping its entry order.
#[instrument(skip_all, fields(entries = table.len()), err)]
pub fn to_bytes(table: &PatchTable) -> Result<Vec<u8>> {
    let mut blob = Vec::new();
    let mut entries = Vec::with_capacity(table.len());

    for entry in table {
        entries.push(WhmEntry {
            hash: entry.hash,
            offset: blob.len() as u32,
        });
        blob.extend_from_slice(entry.text.as_bytes());
        blob.push(0);
    }

    let mut out = Cursor::new(Vec::new());
    WhmHeader::new(entries, blob.len() as u32).write(&mut out)?;

    let mut out = out.into_inner();
    out.extend_from_slice(&blob);
    debug!(bytes = out.len(), "encoded patch table");
    Ok(out)
}

/// Serialize `table` and atomically replace the file at `path` with it.
pub fn write_table(table: &PatchTable, path: impl AsRef<Path>) -> Result<()> {
    let data = to_bytes(table)?;
    gxt_archive::write::persist(path.as_ref(), &data)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::table::{PatchEntry, PatchTable};
    use crate::write::to_bytes;

    #[test]
    fn write_sample() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x02, 0x00, 0x00, 0x00,
            0xEF, 0xBE, 0xAD, 0xDE, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
            0x0C, 0x00, 0x00, 0x00,
            b'H', b'e', b'l', b'l', b'o', 0x00,
            b'W', b'o', b'r', b'l', b'd', 0x00,
        ];

        let table = PatchTable::new(vec![
            PatchEntry::new(0xDEADBEEF, "Hello"),
            PatchEntry::new(1, "World"),
        ]);

        assert_eq!(to_bytes(&table)?, expected);

        Ok(())
    }

    #[test]
    fn order_is_kept() -> Result<()> {
        let table = PatchTable::new(vec![
            PatchEntry::new(9, "é"),
            PatchEntry::new(1, ""),
            PatchEntry::new(9, "again"),
        ]);

        let data = to_bytes(&table)?;
        let hashes: Vec<u8> = data[4..28].chunks(8).map(|e| e[0]).collect();
        let offsets: Vec<u8> = data[4..28].chunks(8).map(|e| e[4]).collect();

        assert_eq!(hashes, vec![9, 1, 9]);
        assert_eq!(offsets, vec![0, 3, 4]);
        assert_eq!(&data[28..32], &[10, 0, 0, 0]);

        Ok(())
    }
}
