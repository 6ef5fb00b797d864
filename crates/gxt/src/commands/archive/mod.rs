use gxt_archive::{text::BatchImport, Archive, Version};
use miette::{miette, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::format::Format;

pub mod build;
pub mod chars;
pub mod export;
pub mod merge;

#[derive(clap::Subcommand)]
pub enum ArchiveCommands {
    /// Export a GXT archive to text
    Export(export::ExportArgs),
    /// Build a GXT archive from text files
    Build(build::BuildArgs),
    /// Merge text files into an existing GXT archive
    Merge(merge::MergeArgs),
    /// List the characters a custom font has to provide
    Chars(chars::CharsArgs),
}

impl ArchiveCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ArchiveCommands::Export(export) => export.handle(),
            ArchiveCommands::Build(build) => build.handle(),
            ArchiveCommands::Merge(merge) => merge.handle(),
            ArchiveCommands::Chars(chars) => chars.handle(),
        }
    }
}

/// Read an archive, rejecting patch tables and unknown files.
pub(crate) fn read_archive(path: &Path) -> Result<(Version, Archive)> {
    let data = super::read_input(path)?;
    match Format::from_path_and_bytes(path, &data)? {
        Format::Archive(_) => Ok(gxt_archive::read::read_archive(&data)?),
        Format::PatchTable => Err(miette!(
            help = "use the whm subcommands for patch tables",
            "{} is a patch table",
            path.display()
        )),
    }
}

/// Import text files for an archive of `version`, reporting rejected files.
pub(crate) fn import(inputs: &[PathBuf], version: Version) -> Result<BatchImport<PathBuf>> {
    let files = super::collect_text_files(inputs)?;
    let batch = gxt_archive::text::import_files(&files, version);

    for (path, error) in &batch.errors {
        eprintln!("{} {}: {}", "error".red().bold(), path.display(), error);
    }
    info!(
        "imported {} of {} files, {} entries",
        batch.imported,
        files.len(),
        batch.archive.entry_count()
    );

    if batch.imported == 0 {
        return Err(miette!("no file could be imported"));
    }
    Ok(batch)
}
