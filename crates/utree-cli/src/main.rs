use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod config;
mod visitors;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();
    commands::run_command(cli)
}
