mod config;
mod tool;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;

use crate::tool::CollateTool;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Collate files from a source tree into a target tree"
)]
pub struct CollateArgs {
    /// Source directory. Defaults to the current directory when only a target is given.
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub(crate) source: Option<PathBuf>,

    /// Target directory
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub(crate) target: Option<PathBuf>,

    /// Copy files instead of moving
    #[arg(short, long)]
    pub(crate) copy: bool,

    /// Print debug information
    #[arg(short = 'D', long)]
    pub(crate) debug: bool,

    /// Only collate files with the given extension
    #[arg(short, long, num_args = 1, action = clap::ArgAction::Append, name = "EXTENSION")]
    pub(crate) extension: Vec<String>,

    /// Overwrite existing files at the target
    #[arg(short, long)]
    pub(crate) force: bool,

    /// Group files under the target by the given scheme
    #[arg(short, long, name = "SCHEME")]
    pub(crate) group: Option<Group>,

    /// Date format for date grouping, one directory level per format
    #[arg(long, num_args = 1, action = clap::ArgAction::Append, name = "FORMAT")]
    pub(crate) date_format: Vec<String>,

    /// Use the file modification time for date grouping instead of the creation time
    #[arg(short, long)]
    pub(crate) modified: bool,

    /// Keep emptied source directories instead of deleting them
    #[arg(short, long)]
    pub(crate) keep: bool,

    /// Fail on name collisions instead of renaming with a unique suffix
    #[arg(short = 'n', long)]
    pub(crate) no_rename: bool,

    /// Only print what would be done without moving anything
    #[arg(short, long)]
    pub(crate) print: bool,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub(crate) recurse: bool,

    /// Re-run the collation every SECONDS seconds until interrupted
    #[arg(long, name = "SECONDS")]
    pub(crate) every: Option<u64>,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    pub(crate) completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Grouping scheme applied under the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Group {
    /// Group by file date
    Date,
    /// Group by file extension
    Extension,
    /// Group by first alphanumeric character
    Alpha,
}

fn main() -> anyhow::Result<()> {
    let args = CollateArgs::parse();
    if let Some(ref shell) = args.completion {
        file_clerk::generate_shell_completion(*shell, CollateArgs::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        CollateTool::new(args)?.run()
    }
}
