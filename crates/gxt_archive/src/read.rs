//! Types for reading GXT archives
//!

use binrw::BinRead;
use byteorder::{ByteOrder, LittleEndian};
use std::{
    io::{Cursor, Seek, SeekFrom},
    path::Path,
};
use tracing::{debug, instrument};

use crate::{
    archive::{Archive, Table},
    charset::CharacterTable,
    encoding::{decode_utf16, EncodingResolver},
    error::{Error, Result},
    hash::format_hash,
    types::{
        decode_name, CharsetBlock, HashedKeyEntry, PlainKeyEntry, TablHeader, TableEntry,
        TdatHeader, TkeyHeader, NAME_SIZE,
    },
    version::{Version, MAIN_TABLE},
};

fn corrupt(context: &'static str) -> impl Fn(binrw::Error) -> Error {
    move |e| Error::corrupt(format!("{context}: {e}"))
}

/// Location of one table's key and text sections.
#[derive(Debug, Copy, Clone)]
struct Section {
    tkey_start: u64,
    tkey_size: u32,
    tdat_start: u64,
    tdat_size: u32,
}

impl Section {
    fn end(&self) -> u64 {
        self.tdat_start + self.tdat_size as u64
    }
}

/// GXT archive reader
///
/// ```no_run
/// fn list_entries(data: &[u8]) -> gxt_archive::error::Result<()> {
///     let gxt = gxt_archive::GxtReader::new(data)?;
///
///     for (table, entries) in gxt.read_archive()? {
///         for (key, text) in entries {
///             println!("[{table}] {key}={text}");
///         }
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct GxtReader<'a> {
    data: &'a [u8],
    version: Version,
    resolver: EncodingResolver,
    charset: Option<CharacterTable>,
}

impl<'a> GxtReader<'a> {
    /// Detect the version of `data` and prepare to read it.
    pub fn new(data: &'a [u8]) -> Result<GxtReader<'a>> {
        let version = Version::detect(data).ok_or(Error::UnrecognizedFormat)?;
        Self::with_version(data, version)
    }

    /// Prepare to read `data` as an archive of `version`.
    pub fn with_version(data: &'a [u8], version: Version) -> Result<GxtReader<'a>> {
        let mut reader = GxtReader {
            data,
            version,
            resolver: EncodingResolver::default(),
            charset: None,
        };
        reader.charset = reader.read_charset()?;
        Ok(reader)
    }

    /// Use `resolver` to decode 8-bit text.
    pub fn with_resolver(mut self, resolver: EncodingResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The version of the archive being read.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Whether the archive carries a table directory.
    pub fn has_multiple_tables(&self) -> bool {
        self.version.has_multiple_tables()
    }

    /// The character table stored in the archive, if any.
    pub fn charset(&self) -> Option<&CharacterTable> {
        self.charset.as_ref()
    }

    /// Read the table directory as `(name, offset)` pairs, in on-disk order.
    ///
    /// Single table archives have no directory and return an empty list.
    pub fn read_tables(&self) -> Result<Vec<(String, u32)>> {
        let start = match self.version {
            Version::Gta3 => return Ok(Vec::new()),
            Version::ViceCity => 0,
            Version::SanAndreas | Version::Gta4 => 4,
        };

        let mut cursor = self.cursor_at(start)?;
        let header = TablHeader::read(&mut cursor).map_err(corrupt("table directory header"))?;
        if header.size as usize % 12 != 0 {
            return Err(Error::corrupt(format!(
                "table directory size {} is not a multiple of 12",
                header.size
            )));
        }

        (0..header.size / 12)
            .map(|_| {
                let entry = TableEntry::read(&mut cursor).map_err(corrupt("table directory"))?;
                Ok((decode_name(&entry.name), entry.offset))
            })
            .collect()
    }

    /// Read the entries of table `name` whose block starts at `offset`.
    ///
    /// Every table but `MAIN` of a multi table archive repeats its name in front of the key
    /// section. For single table archives the only table is `MAIN` at offset `0`.
    pub fn read_keys_and_texts(&self, name: &str, offset: u32) -> Result<Vec<(String, String)>> {
        let section = self.locate_section(offset as u64, self.is_named_block(name))?;
        let tdat = &self.data[section.tdat_start as usize..section.end() as usize];

        let mut cursor = self.cursor_at(section.tkey_start)?;
        let width = self.key_entry_size();
        (0..section.tkey_size / width)
            .map(|_| {
                let (text_offset, key) = if self.version.has_hashed_keys() {
                    let entry = HashedKeyEntry::read(&mut cursor).map_err(corrupt("key entry"))?;
                    (entry.offset, format_hash(entry.hash))
                } else {
                    let entry = PlainKeyEntry::read(&mut cursor).map_err(corrupt("key entry"))?;
                    (entry.offset, decode_name(&entry.name))
                };

                let text = self.read_text(tdat, text_offset).ok_or_else(|| {
                    Error::corrupt(format!(
                        "text of {key} at {text_offset} is outside of a {} byte TDAT",
                        tdat.len()
                    ))
                })?;

                Ok((key, text))
            })
            .collect()
    }

    /// Read every table of the archive.
    #[instrument(skip(self), fields(version = %self.version), err)]
    pub fn read_archive(&self) -> Result<Archive> {
        if !self.has_multiple_tables() {
            let table: Table = self.read_keys_and_texts(MAIN_TABLE, 0)?.into_iter().collect();
            debug!(entries = table.len(), "read {MAIN_TABLE}");
            return Ok(Archive::single(table));
        }

        let mut archive = Archive::default();
        for (name, offset) in self.read_tables()? {
            let table: Table = self.read_keys_and_texts(&name, offset)?.into_iter().collect();
            debug!(entries = table.len(), offset, "read {name}");
            archive.insert(name, table);
        }
        Ok(archive)
    }

    fn key_entry_size(&self) -> u32 {
        if self.version.has_hashed_keys() {
            8
        } else {
            4 + NAME_SIZE as u32
        }
    }

    fn cursor_at(&self, offset: u64) -> Result<Cursor<&'a [u8]>> {
        if offset > self.data.len() as u64 {
            return Err(Error::corrupt(format!(
                "offset {offset} is past the end of a {} byte file",
                self.data.len()
            )));
        }
        let mut cursor = Cursor::new(self.data);
        cursor.seek(SeekFrom::Start(offset))?;
        Ok(cursor)
    }

    fn is_named_block(&self, name: &str) -> bool {
        self.has_multiple_tables() && name != MAIN_TABLE
    }

    fn locate_section(&self, offset: u64, named: bool) -> Result<Section> {
        let mut cursor = self.cursor_at(offset)?;
        if named {
            cursor.seek(SeekFrom::Current(NAME_SIZE as i64))?;
        }

        let tkey = TkeyHeader::read(&mut cursor).map_err(corrupt("key section header"))?;
        if tkey.size % self.key_entry_size() != 0 {
            return Err(Error::corrupt(format!(
                "key section size {} is not a multiple of {}",
                tkey.size,
                self.key_entry_size()
            )));
        }
        let tkey_start = cursor.position();

        cursor.seek(SeekFrom::Current(tkey.size as i64))?;
        let tdat = TdatHeader::read(&mut cursor).map_err(corrupt("text section header"))?;

        let section = Section {
            tkey_start,
            tkey_size: tkey.size,
            tdat_start: cursor.position(),
            tdat_size: tdat.size,
        };

        if section.end() > self.data.len() as u64 {
            return Err(Error::corrupt(format!(
                "text section ends at {} past the end of a {} byte file",
                section.end(),
                self.data.len()
            )));
        }

        Ok(section)
    }

    fn read_text(&self, tdat: &[u8], offset: u32) -> Option<String> {
        let bytes = tdat.get(offset as usize..).filter(|b| !b.is_empty())?;

        let text = if self.version.has_wide_text() {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(LittleEndian::read_u16)
                .take_while(|u| *u != 0)
                .collect();
            decode_utf16(&units)
        } else {
            let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
            self.resolver.decode(&bytes[..end])
        };

        Some(match &self.charset {
            Some(charset) => charset.decode(&text),
            None => text,
        })
    }

    fn read_charset(&self) -> Result<Option<CharacterTable>> {
        let end = match self.version {
            Version::Gta3 => self.locate_section(0, false)?.end(),
            _ => {
                let mut end = self.directory_end()?;
                for (name, offset) in self.read_tables()? {
                    let section = self.locate_section(offset as u64, self.is_named_block(&name))?;
                    end = end.max(section.end());
                }
                end
            }
        };

        if self.data.get(end as usize..end as usize + 4) != Some(b"WCHR".as_slice()) {
            return Ok(None);
        }

        let mut cursor = self.cursor_at(end)?;
        let block = CharsetBlock::read(&mut cursor).map_err(corrupt("character table"))?;
        let charset = CharacterTable::from_block(&block)?;
        debug!(characters = charset.len(), "read character table");
        Ok(Some(charset))
    }

    fn directory_end(&self) -> Result<u64> {
        let start = match self.version {
            Version::Gta3 | Version::ViceCity => 0,
            Version::SanAndreas | Version::Gta4 => 4,
        };
        let mut cursor = self.cursor_at(start)?;
        let header = TablHeader::read(&mut cursor).map_err(corrupt("table directory header"))?;
        Ok(cursor.position() + header.size as u64)
    }
}

/// Detect the version of `data` and read every table.
pub fn read_archive(data: &[u8]) -> Result<(Version, Archive)> {
    let reader = GxtReader::new(data)?;
    Ok((reader.version(), reader.read_archive()?))
}

/// Read a whole archive file into memory and parse it.
#[instrument(skip(path), fields(path = %path.as_ref().display()), err)]
pub fn read_archive_file(path: impl AsRef<Path>) -> Result<(Version, Archive)> {
    let data = std::fs::read(path.as_ref())?;
    read_archive(&data)
}
