use clap::Args;
use gxt_archive::GxtReader;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::format::Format;

#[derive(Args)]
pub struct InfoArgs {
    /// An input GXT archive or whm_table.dat
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let data = super::read_input(&self.file)?;
        let format = Format::from_path_and_bytes(&self.file, &data)?;
        println!("{}: {}", self.file.display(), format.bold());

        match format {
            Format::Archive(_) => {
                let reader = GxtReader::new(&data)?;
                let archive = reader.read_archive()?;

                for (name, table) in &archive {
                    println!("  {:<8} {:>6} entries", name.green(), table.len());
                }
                println!("  {:<8} {:>6} entries", "total", archive.entry_count());

                if let Some(charset) = reader.charset() {
                    println!("  {} remapped characters", charset.len().yellow());
                }
                let special = archive.special_characters();
                if !special.is_empty() {
                    println!("  {} special characters", special.len().yellow());
                }
            }
            Format::PatchTable => {
                let table = gxt_whm::read_table(&data)?;
                println!("  {:>6} entries", table.len());
            }
        }

        Ok(())
    }
}
