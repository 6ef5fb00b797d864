//! Best-effort text decoding for payloads of unknown encoding.
//!
//! Decoding never fails: every candidate encoding is tried in order and bytes that no candidate
//! accepts are rendered as `\xHH` escapes.

use std::fmt::Write;

use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, EncodingRef};
use tracing::warn;
use widestring::U16Str;

/// Encoding labels tried by [`EncodingResolver::default`], in order.
pub const DEFAULT_LABELS: [&str; 2] = ["utf-8", "windows-1252"];

/// Ordered list of text encodings tried when decoding a byte payload.
#[derive(Clone)]
pub struct EncodingResolver {
    encodings: Vec<EncodingRef>,
}

impl std::fmt::Debug for EncodingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.encodings.iter().map(|e| e.name()))
            .finish()
    }
}

impl Default for EncodingResolver {
    fn default() -> Self {
        Self::from_labels(DEFAULT_LABELS)
    }
}

impl EncodingResolver {
    /// Build a resolver from WHATWG encoding labels such as `utf-8`, `gbk` or `windows-1252`.
    ///
    /// Unknown labels are skipped.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let encodings = labels
            .into_iter()
            .filter_map(|label| {
                let encoding = encoding_from_whatwg_label(label);
                if encoding.is_none() {
                    warn!(label, "skipping unknown encoding label");
                }
                encoding
            })
            .collect();
        Self { encodings }
    }

    /// Decode `bytes` with the first encoding that accepts them.
    pub fn decode(&self, bytes: &[u8]) -> String {
        self.encodings
            .iter()
            .find_map(|encoding| encoding.decode(bytes, DecoderTrap::Strict).ok())
            .unwrap_or_else(|| escape_bytes(bytes))
    }
}

/// Decode `bytes` with the default resolver.
pub fn decode_bytes(bytes: &[u8]) -> String {
    EncodingResolver::default().decode(bytes)
}

/// Render every byte as a `\xHH` escape.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4);
    for byte in bytes {
        let _ = write!(out, "\\x{:02X}", byte);
    }
    out
}

/// Decode UTF-16 code units, rendering unpaired surrogates as `\uXXXX` escapes.
pub fn decode_utf16(units: &[u16]) -> String {
    if let Ok(text) = U16Str::from_slice(units).to_string() {
        return text;
    }

    char::decode_utf16(units.iter().copied())
        .fold(String::with_capacity(units.len()), |mut out, c| {
            match c {
                Ok(c) => out.push(c),
                Err(e) => {
                    let _ = write!(out, "\\u{:04X}", e.unpaired_surrogate());
                }
            }
            out
        })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_utf8_first() {
        assert_eq!(decode_bytes("Grüße 你好".as_bytes()), "Grüße 你好");
    }

    #[test]
    fn falls_back_to_windows_1252() {
        // 0xE9 alone is not valid UTF-8
        let text = decode_bytes(&[b'C', b'a', b'f', 0xE9, b' ', 0x80]);
        assert_eq!(text, "Café €");
    }

    #[test]
    fn escapes_when_nothing_matches() {
        let resolver = EncodingResolver::from_labels(["utf-8"]);
        assert_eq!(resolver.decode(&[b'a', 0xFF]), "\\x61\\xFF");
    }

    #[test]
    fn empty_resolver_always_escapes() {
        let resolver = EncodingResolver::from_labels(["not-a-real-label"]);
        assert_eq!(resolver.decode(b"ok"), "\\x6F\\x6B");
    }

    #[test]
    fn utf16_with_unpaired_surrogate() {
        assert_eq!(decode_utf16(&[0x0048, 0x0069]), "Hi");
        assert_eq!(decode_utf16(&[0x0041, 0xD800, 0x0042]), "A\\uD800B");
    }
}
