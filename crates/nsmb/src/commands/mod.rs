pub mod lh;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle LH compressed files
    Lh {
        #[command(subcommand)]
        command: lh::LhCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Lh { command } => command.handle(),
        }
    }
}
