//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent warpper for [`tempfile::PersistError`]
    #[error(transparent)]
    PersistError(#[from] tempfile::PersistError),

    /// file is not a recognized gxt archive
    #[error("file is not a recognized gxt archive")]
    #[diagnostic(help("supported versions are GTA III, Vice City, San Andreas and IV"))]
    UnrecognizedFormat,

    /// gxt archive is corrupt: {0}
    #[error("gxt archive is corrupt: {0}")]
    CorruptArchive(String),

    /// invalid key {key:?} in table {table}: {message}
    #[error("invalid key {key:?} in table {table}: {message}")]
    InvalidKey {
        /// Table holding the key
        table: String,
        /// The rejected key
        key: String,
        /// Why the key was rejected
        message: &'static str,
    },

    /// invalid table name {0:?}
    #[error("invalid table name {0:?}")]
    InvalidTableName(String),

    /// table {0:?} is not supported by a single table archive
    #[error("table {0:?} is not supported by a single table archive")]
    UnexpectedTable(String),

    /// {0} special characters do not fit into the private use area
    #[error("{0} special characters do not fit into the private use area")]
    TooManyCharacters(usize),
}

impl Error {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptArchive(msg.into())
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
