//! This library handles reading from and creating `whm_table.dat` text patch tables.
//!
//! # whm_table Format Documentation
//!
//! A patch table replaces game strings by hash. It is a flat index followed by a blob of
//! NUL terminated strings.
//!
//! | Offset (bytes) | Field      | Description                                          |
//! |----------------|------------|------------------------------------------------------|
//! | 0x0000         | Count      | 4 bytes: number of entries                           |
//! | 0x0004         | Entry      | 8 bytes each: u32 hash, u32 offset into the blob     |
//! | 4 + 8 × count  | Blob Size  | 4 bytes: size of the blob that follows               |
//! | 8 + 8 × count  | Blob       | NUL terminated strings                               |
//!
//! - **Endianness**: Little-endian for all integers
//! - **Text**: written as UTF-8, read with fallback to legacy encodings
//! - **Order**: entries keep the order they are written in, no sorting is applied
//!
//! An entry whose offset is not inside the blob reads back as `[BINARY]`.

pub mod error;
pub mod read;
pub mod table;
pub mod text;
pub mod types;
pub mod write;

pub use read::{read_table, read_table_file};
pub use table::{PatchEntry, PatchTable, PATCH_TABLE};
pub use write::{to_bytes, write_table};
