//! This library handles reading from and creating **GXT** text archives used by *GTA III*,
//! *Vice City*, *San Andreas* and *GTA IV*.
//!
//! # GXT Archive Format Documentation
//!
//! A GXT archive maps short keys to the localized strings the game shows on screen. Each game
//! uses its own dialect, and a file does not name its dialect explicitly: it is detected from the
//! first bytes.
//!
//! | Version      | Header                    | Tables    | Keys                      | Text     |
//! |--------------|---------------------------|-----------|---------------------------|----------|
//! | GTA III      | `TKEY`                    | one       | 8 byte name               | UTF-16LE |
//! | Vice City    | `TABL`                    | directory | 8 byte name               | UTF-16LE |
//! | San Andreas  | `04 00 08 00` then `TABL` | directory | CRC-32 of upper-case key  | 8-bit    |
//! | GTA IV       | `04 00 10 00` then `TABL` | directory | one-at-a-time of the key  | UTF-16LE |
//!
//! All integers are little-endian.
//!
//! ## Table Directory
//!
//! | Offset (bytes) | Field  | Description                                  |
//! |----------------|--------|----------------------------------------------|
//! | 0x0000         | Magic  | 4 bytes: `TABL`                              |
//! | 0x0004         | Size   | 4 bytes: size of the entries that follow     |
//! | 0x0008         | Entry  | 12 bytes each: NUL padded name, u32 offset   |
//!
//! Each offset points to a table block. Blocks of tables other than `MAIN` start with the table
//! name again, as 8 NUL padded bytes.
//!
//! ## Table Block
//!
//! | Field  | Description                                                            |
//! |--------|------------------------------------------------------------------------|
//! | `TKEY` | 4 bytes magic, 4 bytes size, then the key entries                      |
//! | `TDAT` | 4 bytes magic, 4 bytes size, then NUL terminated strings               |
//!
//! Key entries are `{u32 offset, char[8] name}` for plain keys and `{u32 offset, u32 hash}` for
//! hashed keys. The offset is relative to the start of the `TDAT` payload. Entries are sorted by
//! name or hash so the game can binary search them.
//!
//! ## Character Table
//!
//! Archives written with extras carry a `WCHR` block after the last table: a u32 count followed
//! by that many u32 code points. Character `i` of the list appears in the text as `U+E000 + i`,
//! which lets patched fonts draw glyphs the game lacks.
//!
//! ## Interchange Format
//!
//! See [`text`] for the plain-text form used to edit archives.

pub mod archive;
pub mod charset;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod key;
pub mod read;
pub mod text;
pub mod types;
pub mod version;
pub mod write;

pub use archive::{Archive, MergeStats, Table};
pub use charset::CharacterTable;
pub use key::KeyRule;
pub use read::GxtReader;
pub use version::{Version, MAIN_TABLE};
pub use write::{GxtWriter, GxtWriterOptions};
