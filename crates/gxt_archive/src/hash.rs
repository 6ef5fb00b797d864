//! Key hashing used by the hashed key archives and the whm_table patch file.

use crc::{Crc, CRC_32_JAMCRC};

const SAN_ANDREAS_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_JAMCRC);

/// Algorithm used by a game engine to turn a text key into its 32-bit lookup hash.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyHasher {
    /// CRC-32 without final inversion over the upper-cased key (San Andreas)
    UpperCrc32,

    /// Jenkins one-at-a-time over the lower-cased key (GTA IV)
    OneAtATime,
}

impl KeyHasher {
    /// Hash a key.
    pub fn hash(self, key: &str) -> u32 {
        match self {
            KeyHasher::UpperCrc32 => san_andreas_hash(key),
            KeyHasher::OneAtATime => gta4_hash(key),
        }
    }
}

/// Hash a key the way San Andreas' `CKeyGen::GetUppercaseKey` does.
pub fn san_andreas_hash(key: &str) -> u32 {
    let mut digest = SAN_ANDREAS_CRC.digest();
    for byte in key.bytes() {
        digest.update(&[byte.to_ascii_uppercase()]);
    }
    digest.finalize()
}

/// Hash a key the way GTA IV looks up text labels.
pub fn gta4_hash(key: &str) -> u32 {
    let mut hash = 0u32;
    for byte in key.bytes() {
        hash = hash.wrapping_add(byte.to_ascii_lowercase() as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Format a hash the way it is shown to users, e.g. `0x0000ABCD`.
pub fn format_hash(hash: u32) -> String {
    format!("0x{:08X}", hash)
}

/// Parse a `0x`/`0X` prefixed hexadecimal hash string.
pub fn parse_hash(value: &str) -> Option<u32> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))?;
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
