//! Archive versions and header based version detection.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::hash::KeyHasher;
use crate::key::KeyRule;

/// Name of the table every single table archive stores its entries in.
pub const MAIN_TABLE: &str = "MAIN";

/// The four GXT dialects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    /// GTA III: one implicit table, plain keys, UTF-16 text
    Gta3,

    /// Vice City: table directory, plain keys, UTF-16 text
    ViceCity,

    /// San Andreas: table directory, CRC hashed keys, 8-bit text
    SanAndreas,

    /// GTA IV: table directory, one-at-a-time hashed keys, UTF-16 text
    Gta4,
}

impl Version {
    /// All versions, oldest first.
    pub const ALL: [Version; 4] = [
        Version::Gta3,
        Version::ViceCity,
        Version::SanAndreas,
        Version::Gta4,
    ];

    /// Inspect the first bytes of `data` and return the archive version they describe.
    ///
    /// Returns [`None`] for anything that is not a recognized header, including inputs that are
    /// too short to hold one.
    pub fn detect(data: &[u8]) -> Option<Version> {
        match data.get(0..4)? {
            b"TKEY" => return Some(Version::Gta3),
            b"TABL" => return Some(Version::ViceCity),
            _ => {}
        }

        if data.get(4..8)? != b"TABL" || LittleEndian::read_u16(&data[0..2]) != 4 {
            return None;
        }

        match LittleEndian::read_u16(&data[2..4]) {
            8 => Some(Version::SanAndreas),
            16 => Some(Version::Gta4),
            _ => None,
        }
    }

    /// Whether the archive carries a table directory.
    pub const fn has_multiple_tables(self) -> bool {
        !matches!(self, Version::Gta3)
    }

    /// Whether keys are stored as 32-bit hashes.
    pub const fn has_hashed_keys(self) -> bool {
        matches!(self, Version::SanAndreas | Version::Gta4)
    }

    /// Whether text is stored as UTF-16 rather than 8-bit characters.
    pub const fn has_wide_text(self) -> bool {
        !matches!(self, Version::SanAndreas)
    }

    /// The hash used for keys, if the version stores hashed keys.
    pub const fn hasher(self) -> Option<KeyHasher> {
        match self {
            Version::Gta3 | Version::ViceCity => None,
            Version::SanAndreas => Some(KeyHasher::UpperCrc32),
            Version::Gta4 => Some(KeyHasher::OneAtATime),
        }
    }

    /// The rule keys of this version must follow.
    pub const fn key_rule(self) -> KeyRule {
        match self {
            Version::Gta3 => KeyRule::Gta3,
            Version::ViceCity => KeyRule::ViceCity,
            Version::SanAndreas => KeyRule::SanAndreas,
            Version::Gta4 => KeyRule::Gta4,
        }
    }

    /// Characters above this code point need font support in the game.
    pub const fn special_char_threshold(self) -> u32 {
        match self {
            Version::Gta4 => 0xFF,
            Version::Gta3 | Version::ViceCity | Version::SanAndreas => 0x7F,
        }
    }

    /// Default name of a single file text export.
    pub const fn export_file_name(self) -> &'static str {
        match self {
            Version::Gta3 => "GTA3.txt",
            Version::ViceCity => "GTAVC.txt",
            Version::SanAndreas => "GTASA.txt",
            Version::Gta4 => "GTA4.txt",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Version::Gta3 => "GTA III",
            Version::ViceCity => "Vice City",
            Version::SanAndreas => "San Andreas",
            Version::Gta4 => "GTA IV",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detect_versions() {
        assert_eq!(Version::detect(b"TKEY\x00\x00\x00\x00"), Some(Version::Gta3));
        assert_eq!(Version::detect(b"TABL\x00\x00\x00\x00"), Some(Version::ViceCity));
        assert_eq!(
            Version::detect(b"\x04\x00\x08\x00TABL\x00\x00\x00\x00"),
            Some(Version::SanAndreas)
        );
        assert_eq!(
            Version::detect(b"\x04\x00\x10\x00TABL\x00\x00\x00\x00"),
            Some(Version::Gta4)
        );
    }

    #[test]
    fn detect_rejects_garbage() {
        assert_eq!(Version::detect(b""), None);
        assert_eq!(Version::detect(b"TK"), None);
        assert_eq!(Version::detect(b"\x04\x00\x08\x00"), None);
        assert_eq!(Version::detect(b"\x04\x00\x20\x00TABL"), None);
        assert_eq!(Version::detect(b"\x05\x00\x08\x00TABL"), None);
        assert_eq!(Version::detect(b"RIFF\x00\x00\x00\x00WAVE"), None);
    }

    #[test]
    fn version_properties() {
        assert!(!Version::Gta3.has_multiple_tables());
        assert!(Version::ViceCity.has_multiple_tables());
        assert!(Version::SanAndreas.has_hashed_keys());
        assert!(!Version::SanAndreas.has_wide_text());
        assert_eq!(Version::Gta4.hasher(), Some(KeyHasher::OneAtATime));
        assert_eq!(Version::ViceCity.hasher(), None);
    }
}
