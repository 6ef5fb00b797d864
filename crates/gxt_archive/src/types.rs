//! Base types for structure of GXT files.

use binrw::{BinRead, BinWrite};

/// Size in bytes of a table or key name field
pub const NAME_SIZE: usize = 8;

/// Header that precedes the table directory of San Andreas and GTA IV archives
///
/// Both games write version `4`, followed by the width of a character in bits.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct VersionHeader {
    /// Always `4`
    pub version: u16,

    /// `8` for San Andreas, `16` for GTA IV
    pub bits_per_char: u16,
}

/// Header of the table directory, `TABL`
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"TABL", little)]
pub struct TablHeader {
    /// The size in bytes of the directory that follows
    pub size: u32,
}

/// Header of a key section, `TKEY`
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"TKEY", little)]
pub struct TkeyHeader {
    /// The size in bytes of the key entries that follow
    pub size: u32,
}

/// Header of a text section, `TDAT`
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"TDAT", little)]
pub struct TdatHeader {
    /// The size in bytes of the text payload that follows
    pub size: u32,
}

/// Entry of the table directory
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct TableEntry {
    /// NUL padded table name
    pub name: [u8; NAME_SIZE],

    /// Offset from the start of the file to the table's block
    pub offset: u32,
}

/// Key entry of GTA III and Vice City archives
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct PlainKeyEntry {
    /// Offset in bytes from the start of the text payload
    pub offset: u32,

    /// NUL padded key name
    pub name: [u8; NAME_SIZE],
}

/// Key entry of San Andreas and GTA IV archives
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct HashedKeyEntry {
    /// Offset in bytes from the start of the text payload
    pub offset: u32,

    /// Hash of the key name
    pub hash: u32,
}

/// Character table appended after the last text section, `WCHR`
///
/// Entry `i` is the character stored as `U+E000 + i` in the archive's text.
#[derive(BinRead, BinWrite, Debug, Default, Clone, PartialEq)]
#[brw(magic = b"WCHR", little)]
pub struct CharsetBlock {
    /// Number of code points
    pub count: u32,

    /// The remapped code points, in glyph order
    #[br(count = count)]
    pub code_points: Vec<u32>,
}

impl CharsetBlock {
    /// Create a block holding `code_points`.
    pub fn new(code_points: Vec<u32>) -> Self {
        Self {
            count: code_points.len() as u32,
            code_points,
        }
    }
}

/// Encode a table or key name into its NUL padded on-disk form.
///
/// Callers validate names first, so anything longer than seven bytes is truncated.
pub fn encode_name(name: &str) -> [u8; NAME_SIZE] {
    let mut raw = [0u8; NAME_SIZE];
    for (dst, src) in raw.iter_mut().zip(name.bytes().take(NAME_SIZE - 1)) {
        *dst = src;
    }
    raw
}

/// Decode a NUL padded name.
pub fn decode_name(raw: &[u8; NAME_SIZE]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(NAME_SIZE);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::*;

    #[test]
    fn read_table_entry() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'M', b'A', b'I', b'N', 0x00, 0x00, 0x00, 0x00,
            0x18, 0x00, 0x00, 0x00,
        ]);

        let expected = TableEntry {
            name: *b"MAIN\0\0\0\0",
            offset: 24,
        };

        assert_eq!(TableEntry::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_headers() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0x04, 0x00, 0x10, 0x00,
            b'T', b'A', b'B', b'L', 0x0C, 0x00, 0x00, 0x00,
            b'T', b'K', b'E', b'Y', 0x08, 0x00, 0x00, 0x00,
            b'T', b'D', b'A', b'T', 0x04, 0x00, 0x00, 0x00,
        ];

        let mut actual = Vec::new();
        let mut cursor = Cursor::new(&mut actual);
        VersionHeader {
            version: 4,
            bits_per_char: 16,
        }
        .write(&mut cursor)?;
        TablHeader { size: 12 }.write(&mut cursor)?;
        TkeyHeader { size: 8 }.write(&mut cursor)?;
        TdatHeader { size: 4 }.write(&mut cursor)?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_wrong_magic() {
        let mut input = Cursor::new(b"TDAT\x00\x00\x00\x00".to_vec());
        assert!(TkeyHeader::read(&mut input).is_err());
    }

    #[test]
    fn charset_block_round_trip() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            b'W', b'C', b'H', b'R',
            0x02, 0x00, 0x00, 0x00,
            0x60, 0x4F, 0x00, 0x00,
            0x7D, 0x59, 0x00, 0x00,
        ];

        let block = CharsetBlock::new(vec![0x4F60, 0x597D]);

        let mut actual = Vec::new();
        block.write(&mut Cursor::new(&mut actual))?;
        assert_eq!(actual, expected);

        let read = CharsetBlock::read(&mut Cursor::new(actual))?;
        assert_eq!(read.code_points, vec![0x4F60, 0x597D]);

        Ok(())
    }

    #[test]
    fn names() {
        assert_eq!(encode_name("FEM_OK"), *b"FEM_OK\0\0");
        assert_eq!(encode_name("ABCDEFGHIJ"), *b"ABCDEFG\0");
        assert_eq!(decode_name(b"FEM_OK\0\0"), "FEM_OK");
        assert_eq!(decode_name(b"ABCDEFGH"), "ABCDEFGH");
    }
}
