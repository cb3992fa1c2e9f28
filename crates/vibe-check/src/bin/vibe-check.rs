use anyhow::Result;
use clap::Parser;
use vibe_check::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::run(&cli)
}
