use clap::Args;
use gxt_archive::{GxtWriter, GxtWriterOptions};
use miette::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct MergeArgs {
    /// The GXT archive to start from
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Text files or directories of text files
    #[arg(short, long, value_name = "PATH", required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Target GXT archive
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Replace the text of keys that already exist
    #[arg(long, default_value_t = false)]
    replace: bool,

    /// Remap special characters and append the character table
    #[arg(long, default_value_t = false)]
    extras: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl MergeArgs {
    pub fn handle(&self) -> Result<()> {
        crate::commands::check_target(&self.output, self.overwrite)?;

        let (version, mut archive) = super::read_archive(&self.file)?;
        let batch = super::import(&self.input, version)?;

        let stats = archive.merge(batch.archive, self.replace);
        info!(
            "added {}, replaced {}, kept {}",
            stats.added,
            stats.overwritten,
            stats.conflicts - stats.overwritten
        );

        let options = GxtWriterOptions::builder()
            .generate_extras(self.extras)
            .build();
        GxtWriter::new(version, options).write(&archive, &self.output)?;
        info!("wrote {} archive {}", version, self.output.display());

        Ok(())
    }
}
