use clap::Args;
use gxt_archive::Version;
use itertools::Itertools;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

use crate::format::VersionArg;

#[derive(Args)]
pub struct CharsArgs {
    /// A GXT archive, or text files with --game
    #[arg(short, long, value_name = "PATH", required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Read the inputs as text files for this game
    #[arg(short = 'g', long, value_enum)]
    game: Option<VersionArg>,

    /// Write the characters to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl CharsArgs {
    pub fn handle(&self) -> Result<()> {
        let archive = match self.game {
            Some(game) => super::import(&self.input, Version::from(game))?.archive,
            None => {
                let mut archive = gxt_archive::Archive::default();
                for path in &self.input {
                    archive.merge(super::read_archive(path)?.1, false);
                }
                archive
            }
        };

        let chars = archive.special_characters();
        info!("{} special characters", chars.len());
        let line = chars.iter().join("");

        match &self.output {
            Some(target) => {
                crate::commands::check_target(target, self.overwrite)?;
                gxt_archive::write::persist(target, line.as_bytes())?;
                info!("wrote {}", target.display());
            }
            None => println!("{line}"),
        }

        Ok(())
    }
}
