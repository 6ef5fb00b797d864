//! File format dispatch for the command line.

use std::{fmt, path::Path};

use clap::ValueEnum;
use gxt_archive::Version;
use miette::{miette, Result};

/// File name that selects the patch table codec.
pub const PATCH_TABLE_FILE_NAME: &str = "whm_table.dat";

/// Every file the tool understands
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Archive(Version),
    PatchTable,
}

impl Format {
    /// Pick the codec for a file.
    ///
    /// A file named `whm_table.dat`, in any case, is a patch table. Anything else must be a
    /// recognized archive.
    pub fn from_path_and_bytes(path: &Path, data: &[u8]) -> Result<Format> {
        if is_patch_table(path) {
            return Ok(Format::PatchTable);
        }

        Version::detect(data).map(Format::Archive).ok_or_else(|| {
            miette!(
                help = "supported versions are GTA III, Vice City, San Andreas and IV",
                "{} is not a recognized gxt archive",
                path.display()
            )
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Archive(version) => write!(f, "{version} archive"),
            Format::PatchTable => f.write_str("whm_table patch table"),
        }
    }
}

/// Whether `path` names a patch table.
pub fn is_patch_table(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(PATCH_TABLE_FILE_NAME))
}

/// Archive version as given on the command line
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum VersionArg {
    /// GTA III
    #[value(alias = "gta3")]
    Iii,
    /// Vice City
    #[value(alias = "gtavc")]
    Vc,
    /// San Andreas
    #[value(alias = "gtasa")]
    Sa,
    /// GTA IV
    #[value(alias = "gta4")]
    Iv,
}

impl From<VersionArg> for Version {
    fn from(value: VersionArg) -> Self {
        match value {
            VersionArg::Iii => Version::Gta3,
            VersionArg::Vc => Version::ViceCity,
            VersionArg::Sa => Version::SanAndreas,
            VersionArg::Iv => Version::Gta4,
        }
    }
}
