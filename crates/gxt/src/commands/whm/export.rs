use clap::Args;
use gxt_whm::text;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ExportArgs {
    /// An input whm_table.dat
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target text or JSON file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Write JSON items instead of 0x########=text lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        crate::commands::check_target(&self.output, self.overwrite)?;

        let data = crate::commands::read_input(&self.file)?;
        let table = gxt_whm::read_table(&data)?;

        let content = if self.json {
            text::to_json(&table)?
        } else {
            text::format(&table)
        };
        gxt_archive::write::persist(&self.output, content.as_bytes())?;
        info!("wrote {} entries to {}", table.len(), self.output.display());

        Ok(())
    }
}
