//! Types for writing GXT archives
//!

use std::{
    borrow::Cow,
    io::{Cursor, Write},
    path::Path,
};

use binrw::BinWrite;
use bon::Builder;
use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};
use widestring::U16String;

use crate::{
    archive::{Archive, Table},
    charset::CharacterTable,
    error::{Error, Result},
    hash::{format_hash, parse_hash},
    key::{is_valid_table_name, KeyRule},
    types::{
        encode_name, HashedKeyEntry, PlainKeyEntry, TablHeader, TableEntry, TdatHeader,
        TkeyHeader, VersionHeader, NAME_SIZE,
    },
    version::{Version, MAIN_TABLE},
};

/// Options to adjust what [`GxtWriter`] emits
#[derive(Builder, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct GxtWriterOptions {
    /// Remap special characters onto private use code points and append the character table.
    #[builder(default)]
    pub generate_extras: bool,
}

/// On-disk form of a key, ordered the way the game looks keys up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum EncodedKey {
    Plain([u8; NAME_SIZE]),
    Hashed(u32),
}

/// GXT archive writer
///
/// ```no_run
/// use gxt_archive::{Archive, GxtWriter, GxtWriterOptions, Table, Version};
///
/// fn write_archive() -> gxt_archive::error::Result<()> {
///     let table: Table = [("FEM_OK", "OK")].into_iter().collect();
///     let archive = Archive::single(table);
///
///     let options = GxtWriterOptions::builder().generate_extras(true).build();
///     GxtWriter::new(Version::ViceCity, options).write(&archive, "american.gxt")
/// }
/// ```
#[derive(Debug, Copy, Clone)]
pub struct GxtWriter {
    version: Version,
    options: GxtWriterOptions,
}

impl GxtWriter {
    /// Create a writer for archives of `version`.
    pub fn new(version: Version, options: GxtWriterOptions) -> Self {
        Self { version, options }
    }

    /// The version this writer emits.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The character table that [`GxtWriter::to_bytes`] would append for `archive`.
    pub fn charset(&self, archive: &Archive) -> Result<Option<CharacterTable>> {
        if !self.options.generate_extras {
            return Ok(None);
        }

        let chars = archive.characters_above(self.version.special_char_threshold());
        if chars.is_empty() {
            return Ok(None);
        }

        CharacterTable::new(chars).map(Some)
    }

    /// Serialize `archive` into a complete archive file.
    #[instrument(skip_all, fields(version = %self.version), err)]
    pub fn to_bytes(&self, archive: &Archive) -> Result<Vec<u8>> {
        let charset = self.charset(archive)?;
        let mut out = Cursor::new(Vec::new());

        if self.version.has_multiple_tables() {
            let tables = self.ordered_tables(archive)?;

            if self.version.has_hashed_keys() {
                VersionHeader {
                    version: 4,
                    bits_per_char: if self.version.has_wide_text() { 16 } else { 8 },
                }
                .write(&mut out)?;
            }

            let directory_size = (tables.len() * 12) as u32;
            TablHeader {
                size: directory_size,
            }
            .write(&mut out)?;

            let blocks = tables
                .iter()
                .map(|(name, table)| self.table_block(name, table, charset.as_ref()))
                .collect::<Result<Vec<_>>>()?;

            let mut offset = out.position() as u32 + directory_size;
            for ((name, _), block) in tables.iter().zip(&blocks) {
                TableEntry {
                    name: encode_name(name),
                    offset,
                }
                .write(&mut out)?;
                offset += block.len() as u32;
            }

            for block in &blocks {
                out.write_all(block)?;
            }
        } else {
            if let Some(name) = archive.keys().find(|name| *name != MAIN_TABLE) {
                return Err(Error::UnexpectedTable(name.clone()));
            }

            let empty = Table::default();
            let table = archive.get(MAIN_TABLE).unwrap_or(&empty);
            out.write_all(&self.table_block(MAIN_TABLE, table, charset.as_ref())?)?;
        }

        if let Some(charset) = &charset {
            debug!(characters = charset.len(), "appending character table");
            charset.to_block().write(&mut out)?;
        }

        Ok(out.into_inner())
    }

    /// Serialize `archive` and atomically replace the file at `path` with it.
    pub fn write(&self, archive: &Archive, path: impl AsRef<Path>) -> Result<()> {
        let data = self.to_bytes(archive)?;
        persist(path.as_ref(), &data)
    }

    /// Tables with validated names, `MAIN` first and the rest in byte order.
    fn ordered_tables<'a>(&self, archive: &'a Archive) -> Result<Vec<(&'a str, &'a Table)>> {
        let mut tables = archive
            .iter()
            .map(|(name, table)| {
                if is_valid_table_name(self.version, name) {
                    Ok((name.as_str(), table))
                } else {
                    Err(Error::InvalidTableName(name.clone()))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        tables.sort_by(|(a, _), (b, _)| (*a != MAIN_TABLE, a).cmp(&(*b != MAIN_TABLE, b)));
        Ok(tables)
    }

    fn encode_key(&self, table: &str, key: &str) -> Result<EncodedKey> {
        let invalid = |message| Error::InvalidKey {
            table: table.to_string(),
            key: key.to_string(),
            message,
        };

        let Some(hasher) = self.version.hasher() else {
            self.version.key_rule().validate(key).map_err(invalid)?;
            return Ok(EncodedKey::Plain(encode_name(key)));
        };

        let hash = match self.version {
            Version::SanAndreas if KeyRule::SanAndreas.is_valid(key) => {
                let digits = key
                    .strip_prefix("0x")
                    .or_else(|| key.strip_prefix("0X"))
                    .unwrap_or(key);
                u32::from_str_radix(digits, 16)
                    .map_err(|_| invalid(KeyRule::SanAndreas.message()))?
            }
            Version::SanAndreas if KeyRule::Gta4.is_valid(key) && parse_hash(key).is_none() => {
                hasher.hash(key)
            }
            Version::SanAndreas => return Err(invalid(KeyRule::SanAndreas.message())),
            _ => {
                self.version.key_rule().validate(key).map_err(invalid)?;
                parse_hash(key).unwrap_or_else(|| hasher.hash(key))
            }
        };
        Ok(EncodedKey::Hashed(hash))
    }

    fn table_block(
        &self,
        name: &str,
        table: &Table,
        charset: Option<&CharacterTable>,
    ) -> Result<Vec<u8>> {
        let mut entries = table
            .iter()
            .map(|(key, text)| Ok((self.encode_key(name, key)?, text)))
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by_key(|(key, _)| *key);

        // Several keys may share a hash, the last one read wins
        let mut unique: Vec<(EncodedKey, &String)> = Vec::with_capacity(entries.len());
        for (key, text) in entries {
            match unique.last_mut() {
                Some(last) if last.0 == key => {
                    if let EncodedKey::Hashed(hash) = key {
                        warn!("duplicate hash {} in table {name}", format_hash(hash));
                    }
                    last.1 = text;
                }
                _ => unique.push((key, text)),
            }
        }

        let mut tkey = Cursor::new(Vec::new());
        let mut tdat = Vec::new();
        for (key, text) in unique {
            let offset = tdat.len() as u32;
            let text = match charset {
                Some(charset) => Cow::Owned(charset.encode(text)),
                None => Cow::Borrowed(text.as_str()),
            };

            if self.version.has_wide_text() {
                for unit in U16String::from_str(&*text).into_vec() {
                    tdat.write_u16::<LittleEndian>(unit)?;
                }
                tdat.write_u16::<LittleEndian>(0)?;
            } else {
                tdat.extend_from_slice(text.as_bytes());
                tdat.push(0);
            }

            match key {
                EncodedKey::Plain(name) => PlainKeyEntry { offset, name }.write(&mut tkey)?,
                EncodedKey::Hashed(hash) => HashedKeyEntry { offset, hash }.write(&mut tkey)?,
            }
        }
        let tkey = tkey.into_inner();

        let mut block = Cursor::new(Vec::new());
        if self.version.has_multiple_tables() && name != MAIN_TABLE {
            block.write_all(&encode_name(name))?;
        }
        TkeyHeader {
            size: tkey.len() as u32,
        }
        .write(&mut block)?;
        block.write_all(&tkey)?;
        TdatHeader {
            size: tdat.len() as u32,
        }
        .write(&mut block)?;
        block.write_all(&tdat)?;

        debug!(entries = table.len(), bytes = block.get_ref().len(), "encoded {name}");
        Ok(block.into_inner())
    }
}

/// Write `data` to a temporary file next to `path`, then move it into place.
///
/// The file at `path` is either fully replaced or left untouched.
pub fn persist(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(data)?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    Ok(())
}
