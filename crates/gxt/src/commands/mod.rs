use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use walkdir::WalkDir;

pub mod archive;
pub mod info;
pub mod whm;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Describe a GXT archive or patch table
    Info(info::InfoArgs),
    /// Handle GXT archives
    Archive {
        #[command(subcommand)]
        command: archive::ArchiveCommands,
    },
    /// Handle whm_table.dat patch tables
    Whm {
        #[command(subcommand)]
        command: whm::WhmCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Info(info) => info.handle(),
            Commands::Archive { command } => command.handle(),
            Commands::Whm { command } => command.handle(),
        }
    }
}

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .into_diagnostic()
        .context(format!("reading {}", path.display()))
}

/// Refuse to replace an existing file unless allowed to.
pub(crate) fn check_target(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(miette!(
            help = "pass --overwrite to replace it",
            "{} already exists",
            path.display()
        ));
    }
    Ok(())
}

/// Expand directories into the `.txt` files below them, sorted by path.
pub(crate) fn collect_text_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut found = WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt")))
            .collect::<Vec<_>>();
        files.append(&mut found);
    }

    if files.is_empty() {
        return Err(miette!("no text files to import"));
    }
    Ok(files)
}

#[cfg(test)]
mod test {
    use miette::{IntoDiagnostic, Result};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text_files_are_collected_in_order() -> Result<()> {
        let dir = tempfile::tempdir().into_diagnostic()?;
        for name in ["b.txt", "a.TXT", "skip.gxt"] {
            std::fs::write(dir.path().join(name), "").into_diagnostic()?;
        }
        let extra = dir.path().join("extra.gxt");

        let files = collect_text_files(&[dir.path().to_path_buf(), extra.clone()])?;
        assert_eq!(
            files,
            vec![dir.path().join("a.TXT"), dir.path().join("b.txt"), extra]
        );
        Ok(())
    }

    #[test]
    fn existing_targets_need_overwrite() -> Result<()> {
        let file = tempfile::NamedTempFile::new().into_diagnostic()?;
        assert!(check_target(file.path(), false).is_err());
        assert!(check_target(file.path(), true).is_ok());
        Ok(())
    }
}
