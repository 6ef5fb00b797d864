//! Key and table name rules for each archive version and for the whm_table patch file.

use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::version::{Version, MAIN_TABLE};

const HEX: (
    std::ops::RangeInclusive<char>,
    std::ops::RangeInclusive<char>,
    std::ops::RangeInclusive<char>,
) = ('0'..='9', 'a'..='f', 'A'..='F');

fn mixed_case_word<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_while(1..=7, ('0'..='9', 'A'..='Z', 'a'..='z', '_')).parse_next(input)
}

fn upper_case_word<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_while(1..=7, ('0'..='9', 'A'..='Z', '_')).parse_next(input)
}

fn identifier<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_while(1.., ('0'..='9', 'A'..='Z', 'a'..='z', '_')).parse_next(input)
}

fn hex_prefix<'s>(input: &mut &'s str) -> PResult<&'s str> {
    alt(("0x", "0X")).parse_next(input)
}

fn short_hash(input: &mut &str) -> PResult<()> {
    (opt(hex_prefix), take_while(1..=8, HEX))
        .void()
        .parse_next(input)
}

fn full_hash(input: &mut &str) -> PResult<()> {
    (hex_prefix, take_while(8, HEX)).void().parse_next(input)
}

fn has_hex_prefix(key: &str) -> bool {
    key.starts_with("0x") || key.starts_with("0X")
}

/// The shape a key has to follow before it is accepted into a table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyRule {
    /// 1-7 digits, letters or underscores
    Gta3,

    /// 1-7 digits, upper-case letters or underscores
    ViceCity,

    /// 1-8 hexadecimal digits, optionally prefixed with `0x`
    SanAndreas,

    /// a plain identifier, or `0x` followed by exactly 8 hexadecimal digits
    Gta4,

    /// `0x` followed by exactly 8 hexadecimal digits
    PatchTable,
}

impl KeyRule {
    /// Whether `key` satisfies this rule.
    pub fn is_valid(self, key: &str) -> bool {
        match self {
            KeyRule::Gta3 => mixed_case_word.parse(key).is_ok(),
            KeyRule::ViceCity => upper_case_word.parse(key).is_ok(),
            KeyRule::SanAndreas => short_hash.parse(key).is_ok(),
            KeyRule::Gta4 if has_hex_prefix(key) => full_hash.parse(key).is_ok(),
            KeyRule::Gta4 => identifier.parse(key).is_ok(),
            KeyRule::PatchTable => full_hash.parse(key).is_ok(),
        }
    }

    /// Check `key`, returning the rule's description when it is rejected.
    pub fn validate(self, key: &str) -> Result<(), &'static str> {
        if self.is_valid(key) {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    /// Human readable description of the rule.
    pub const fn message(self) -> &'static str {
        match self {
            KeyRule::Gta3 => "GTA III keys must be 1-7 digits, letters or underscores",
            KeyRule::ViceCity => {
                "Vice City keys must be 1-7 digits, upper-case letters or underscores"
            }
            KeyRule::SanAndreas => "San Andreas keys must be 1-8 hexadecimal digits",
            KeyRule::Gta4 => {
                "GTA IV keys must be letters, digits and underscores, or 0x followed by 8 hexadecimal digits"
            }
            KeyRule::PatchTable => "whm_table keys must be 0x followed by 8 hexadecimal digits",
        }
    }
}

/// Whether `name` may be used as a table name in an archive of `version`.
pub fn is_valid_table_name(version: Version, name: &str) -> bool {
    match version {
        Version::Gta3 => name == MAIN_TABLE,
        Version::ViceCity | Version::SanAndreas => upper_case_word.parse(name).is_ok(),
        Version::Gta4 => mixed_case_word.parse(name).is_ok(),
    }
}
