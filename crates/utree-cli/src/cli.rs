use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use utree_types::Depth;

#[derive(Parser)]
#[command(
    name = "utree",
    about = "Walk a workspace model merged with the files on disk",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./utree.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workspace snapshot to use instead of the configured one
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Follow symbolic links on disk
    #[arg(long, global = true)]
    pub follow_symlinks: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a workspace snapshot with the given projects
    Init(InitArgs),
    /// Print the merged tree
    Tree(TreeArgs),
    /// Report resources that exist only on disk or only in the workspace
    Status(StatusArgs),
    /// Bring the workspace in line with the disk
    Refresh(RefreshArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project as NAME=PATH; may be repeated
    #[arg(long = "project", value_name = "NAME=PATH", required = true)]
    pub projects: Vec<String>,
    /// Overwrite an existing snapshot
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Resource to start from (defaults to the workspace root)
    #[arg(conflicts_with = "dir")]
    pub resource: Option<String>,
    /// Walk a directory that is not part of the workspace
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// zero, one, infinite or a level count
    #[arg(long)]
    pub depth: Option<Depth>,
}

#[derive(Args)]
pub struct StatusArgs {
    pub resource: Option<String>,
    #[arg(long)]
    pub depth: Option<Depth>,
}

#[derive(Args)]
pub struct RefreshArgs {
    pub resource: Option<String>,
    /// Report changes without saving them
    #[arg(long)]
    pub dry_run: bool,
}
