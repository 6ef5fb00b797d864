use clap::Args;
use gxt_archive::{GxtWriter, GxtWriterOptions, Version};
use miette::Result;
use std::path::PathBuf;
use tracing::info;

use crate::format::VersionArg;

#[derive(Args)]
pub struct BuildArgs {
    /// Text files or directories of text files
    #[arg(short, long, value_name = "PATH", required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// A target GXT archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The game to build for
    #[arg(short = 'g', long, value_enum)]
    game: VersionArg,

    /// Remap special characters and append the character table
    #[arg(long, default_value_t = false)]
    extras: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl BuildArgs {
    pub fn handle(&self) -> Result<()> {
        let version = Version::from(self.game);
        crate::commands::check_target(&self.file, self.overwrite)?;

        let batch = super::import(&self.input, version)?;

        let options = GxtWriterOptions::builder()
            .generate_extras(self.extras)
            .build();
        GxtWriter::new(version, options).write(&batch.archive, &self.file)?;
        info!("wrote {} archive {}", version, self.file.display());

        Ok(())
    }
}
