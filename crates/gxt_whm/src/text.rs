//! Text and JSON interchange for patch tables.
//!
//! The text form holds one `0x########=text` line per entry:
//!
//! ```text
//! 0xDEADBEEF=Hello
//! 0x00000001=World
//! ```

use std::fmt::Write as _;

use gxt_archive::{
    hash::{format_hash, parse_hash},
    key::KeyRule,
    text::{lines, ImportError, ImportErrorKind, Line},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    table::{PatchEntry, PatchTable},
};

/// Entries and errors of one parsed text file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Every valid entry, in file order
    pub table: PatchTable,

    /// Every rejected line, in file order
    pub errors: Vec<ImportError>,
}

/// Render `table` one entry per line, in table order.
pub fn format(table: &PatchTable) -> String {
    let mut out = String::new();
    for entry in table {
        let _ = writeln!(out, "{}={}", format_hash(entry.hash), entry.text);
    }
    out
}

/// Parse the text form of a patch table.
///
/// The text is kept as written after the first `=`, only the line itself is trimmed.
pub fn parse(text: &str) -> Parsed {
    let mut parsed = Parsed::default();

    for (line, kind) in lines(text, false) {
        let kind = match kind {
            Line::Entry(key, value) => {
                let key = key.trim();
                match parse_hash(key).filter(|_| KeyRule::PatchTable.is_valid(key)) {
                    Some(hash) => {
                        parsed.table.push(PatchEntry::new(hash, value));
                        continue;
                    }
                    None => ImportErrorKind::InvalidKey {
                        key: key.to_string(),
                        message: KeyRule::PatchTable.message(),
                    },
                }
            }
            Line::Header(_) | Line::NoSeparator(_) => ImportErrorKind::MissingSeparator,
        };
        parsed.errors.push(ImportError { line, kind });
    }

    parsed
}

/// JSON form of an entry, as used by translation sheets
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct JsonItem {
    /// Hash of the text key
    pub hash: u32,

    /// Text as read from the table
    #[serde(default)]
    pub original: String,

    /// Replacement text, empty when not translated yet
    #[serde(default)]
    pub translated: String,

    /// Free form note for translators
    #[serde(default)]
    pub desc: String,
}

impl From<&PatchEntry> for JsonItem {
    fn from(entry: &PatchEntry) -> Self {
        Self {
            hash: entry.hash,
            original: entry.text.clone(),
            ..Default::default()
        }
    }
}

impl From<JsonItem> for PatchEntry {
    fn from(item: JsonItem) -> Self {
        let text = if item.translated.is_empty() {
            item.original
        } else {
            item.translated
        };
        PatchEntry::new(item.hash, text)
    }
}

/// Render `table` as a pretty printed JSON array of [`JsonItem`].
pub fn to_json(table: &PatchTable) -> Result<String> {
    let items: Vec<JsonItem> = table.iter().map(JsonItem::from).collect();
    Ok(serde_json::to_string_pretty(&items)?)
}

/// Parse a JSON array of [`JsonItem`], preferring translated text.
pub fn from_json(json: &str) -> Result<PatchTable> {
    let items: Vec<JsonItem> = serde_json::from_str(json)?;
    Ok(items.into_iter().map(PatchEntry::from).collect())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> PatchTable {
        PatchTable::new(vec![
            PatchEntry::new(0xDEADBEEF, "Hello"),
            PatchEntry::new(1, "World"),
        ])
    }

    #[test]
    fn format_sample() {
        assert_eq!(format(&sample()), "0xDEADBEEF=Hello\n0x00000001=World\n");
    }

    #[test]
    fn parse_sample() {
        let parsed = parse("\u{FEFF}0xDEADBEEF=Hello\n\n  0x00000001=World  \n");
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.table, sample());
    }

    #[test]
    fn parse_keeps_text_as_written() {
        let parsed = parse("0x00000002= a = b\n");
        assert_eq!(parsed.table[0].text, " a = b");
    }

    #[test]
    fn parse_errors() {
        let parsed = parse("DEADBEEF=no prefix\n0x1=short\nnothing\n0x0000000A=ok\n");

        assert_eq!(parsed.table, PatchTable::new(vec![PatchEntry::new(10, "ok")]));
        let lines: Vec<_> = parsed.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        assert_eq!(parsed.errors[2].kind, ImportErrorKind::MissingSeparator);
    }

    #[test]
    fn json_prefers_translation() -> Result<()> {
        let json = r#"[
            {"hash": 3735928559, "original": "Hello", "translated": "你好", "desc": ""},
            {"hash": 1, "original": "World"}
        ]"#;

        let table = from_json(json)?;
        assert_eq!(
            table,
            PatchTable::new(vec![
                PatchEntry::new(0xDEADBEEF, "你好"),
                PatchEntry::new(1, "World"),
            ])
        );

        let items: Vec<JsonItem> = serde_json::from_str(&to_json(&table)?)?;
        assert_eq!(items[0].original, "你好");
        assert_eq!(items[0].translated, "");

        Ok(())
    }
}
