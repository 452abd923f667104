mod cli;
mod config;
mod effects;
mod logging;
mod render;
mod session;
mod shell;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
