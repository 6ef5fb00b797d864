//! Reading whm_table files
//!

use std::{io::Cursor, path::Path};

use binrw::BinRead;
use gxt_archive::encoding::EncodingResolver;
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    table::{PatchEntry, PatchTable},
    types::WhmHeader,
};

/// Text of an entry whose offset lies outside of the blob.
pub const BINARY_SENTINEL: &str = "[BINARY]";

/// Parse a patch table, decoding text with the default encodings.
pub fn read_table(data: &[u8]) -> Result<PatchTable> {
    read_table_with(data, &EncodingResolver::default())
}

/// Parse a patch table, decoding text with `resolver`.
#[instrument(skip_all, err)]
pub fn read_table_with(data: &[u8], resolver: &EncodingResolver) -> Result<PatchTable> {
    let mut cursor = Cursor::new(data);
    let header = WhmHeader::read(&mut cursor)
        .map_err(|e| Error::CorruptArchive(format!("header: {e}")))?;

    let start = cursor.position() as usize;
    let blob = data
        .get(start..start + header.blob_size as usize)
        .ok_or_else(|| {
            Error::CorruptArchive(format!(
                "blob of {} bytes at {start} does not fit into a {} byte file",
                header.blob_size,
                data.len()
            ))
        })?;

    debug!(entries = header.count, blob = blob.len(), "read header");

    Ok(header
        .entries
        .iter()
        .map(|entry| {
            let text = match blob.get(entry.offset as usize..) {
                Some(rest) if !rest.is_empty() => {
                    let end = rest.iter().position(|b| *b == 0).unwrap_or(rest.len());
                    resolver.decode(&rest[..end])
                }
                _ => BINARY_SENTINEL.to_string(),
            };
            PatchEntry::new(entry.hash, text)
        })
        .collect())
}

/// Read a whole patch table file into memory and parse it.
#[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
pub fn read_table_file(path: impl AsRef<Path>) -> Result<PatchTable> {
    let data = std::fs::read(path.as_ref())?;
    read_table(&data)
}

#[cfg(test)]
mod test {
    use gxt_archive::encoding::EncodingResolver;
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::read::{read_table, read_table_with, BINARY_SENTINEL};
    use crate::table::PatchEntry;

    #[rustfmt::skip]
    const SAMPLE: [u8; 36] = [
        0x02, 0x00, 0x00, 0x00,
        0xEF, 0xBE, 0xAD, 0xDE, 0x00, 0x00, 0x00, 0x00,
        0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
        0x0C, 0x00, 0x00, 0x00,
        b'H', b'e', b'l', b'l', b'o', 0x00,
        b'W', b'o', b'r', b'l', b'd', 0x00,
    ];

    #[test]
    fn read_sample() -> Result<()> {
        let table = read_table(&SAMPLE)?;
        assert_eq!(
            table.to_vec(),
            vec![
                PatchEntry::new(0xDEADBEEF, "Hello"),
                PatchEntry::new(1, "World")
            ]
        );
        Ok(())
    }

    #[test]
    fn offset_at_blob_end_is_binary() -> Result<()> {
        let mut data = SAMPLE;
        data[16] = 0x0C;
        let table = read_table(&data)?;
        assert_eq!(table[1].text, BINARY_SENTINEL);

        data[16] = 0xFF;
        let table = read_table(&data)?;
        assert_eq!(table[1].text, BINARY_SENTINEL);
        Ok(())
    }

    #[test]
    fn empty_text_is_empty() -> Result<()> {
        #[rustfmt::skip]
        let data: Vec<u8> = vec![
            0x01, 0x00, 0x00, 0x00,
            0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x00,
        ];
        assert_eq!(read_table(&data)?[0].text, "");
        Ok(())
    }

    #[test]
    fn invalid_utf8_falls_back() -> Result<()> {
        #[rustfmt::skip]
        let data: Vec<u8> = vec![
            0x01, 0x00, 0x00, 0x00,
            0x07, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x05, 0x00, 0x00, 0x00,
            b'c', b'a', b'f', 0xE9, 0x00,
        ];
        assert_eq!(read_table(&data)?[0].text, "café");

        let strict = EncodingResolver::from_labels(["utf-8"]);
        assert_eq!(read_table_with(&data, &strict)?[0].text, "\\x63\\x61\\x66\\xE9");
        Ok(())
    }

    #[test]
    fn truncated_input_is_corrupt() {
        assert!(matches!(
            read_table(&SAMPLE[..10]),
            Err(Error::CorruptArchive(_))
        ));
        assert!(matches!(
            read_table(&SAMPLE[..30]),
            Err(Error::CorruptArchive(_))
        ));
    }
}
