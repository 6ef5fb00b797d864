pub mod build;
pub mod export;

#[derive(clap::Subcommand)]
pub enum WhmCommands {
    /// Export a whm_table.dat to text or JSON
    Export(export::ExportArgs),
    /// Build a whm_table.dat from text or JSON
    Build(build::BuildArgs),
}

impl WhmCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            WhmCommands::Export(export) => export.handle(),
            WhmCommands::Build(build) => build.handle(),
        }
    }
}
