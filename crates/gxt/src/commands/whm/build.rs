use clap::Args;
use gxt_whm::text;
use miette::{miette, Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct BuildArgs {
    /// An input text or JSON file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// A target whm_table.dat
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Read JSON items instead of 0x########=text lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl BuildArgs {
    pub fn handle(&self) -> Result<()> {
        crate::commands::check_target(&self.file, self.overwrite)?;

        let content = std::fs::read_to_string(&self.input)
            .into_diagnostic()
            .context(format!("reading {}", self.input.display()))?;

        let table = if self.json {
            text::from_json(&content)?
        } else {
            let parsed = text::parse(&content);
            for error in &parsed.errors {
                eprintln!("{} {}: {}", "error".red().bold(), self.input.display(), error);
            }
            if !parsed.errors.is_empty() {
                return Err(miette!(
                    "{} lines of {} were rejected",
                    parsed.errors.len(),
                    self.input.display()
                ));
            }
            parsed.table
        };

        gxt_whm::write_table(&table, &self.file)?;
        info!("wrote {} entries to {}", table.len(), self.file.display());

        Ok(())
    }
}
