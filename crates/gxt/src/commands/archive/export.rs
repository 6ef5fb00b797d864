use clap::Args;
use gxt_archive::text;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ExportArgs {
    /// An input GXT archive
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Target text file, or directory with --split
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write one text file per table
    #[arg(long, default_value_t = false)]
    split: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        let (version, archive) = super::read_archive(&self.file)?;
        info!("read {} entries from {version} archive", archive.entry_count());

        if !self.split {
            let target = self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(version.export_file_name()));
            crate::commands::check_target(&target, self.overwrite)?;

            let content = text::format(&archive, version.has_multiple_tables());
            gxt_archive::write::persist(&target, content.as_bytes())?;
            info!("wrote {}", target.display());
            return Ok(());
        }

        if !version.has_multiple_tables() {
            return Err(miette!("{version} archives hold a single table, drop --split"));
        }

        let directory = self.output.clone().unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&directory)
            .into_diagnostic()
            .context(format!("creating {}", directory.display()))?;

        for (name, table) in &archive {
            let target = directory.join(format!("{name}.txt"));
            crate::commands::check_target(&target, self.overwrite)?;

            let content = text::format_table(name, table, true);
            gxt_archive::write::persist(&target, content.as_bytes())?;
            info!("wrote {}", target.display());
        }

        Ok(())
    }
}
