use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "customclean",
    about = "Empties a project's scratch directories, keeping what CustomClean.xml lists",
    version
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deletes every non-excepted file in the configured directories
    #[command(alias = "c")]
    Clean {
        /// Directory holding CustomClean.xml
        #[arg(long, default_value = ".")]
        project_root: PathBuf,
        /// Report what would be deleted without deleting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Writes a starter CustomClean.xml
    Init {
        #[arg(long, default_value = ".")]
        project_root: PathBuf,
        /// Overwrite an existing CustomClean.xml
        #[arg(long)]
        force: bool,
    },
}
