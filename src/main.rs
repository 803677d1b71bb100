//! CLI entry point for the tile-matching board simulator

use clap::Parser;
use matchgrid::io::cli::{Cli, GameRunner, init_logging, print_summary};

fn main() -> matchgrid::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut runner = GameRunner::new(cli);
    let summary = runner.run()?;
    print_summary(&summary);
    Ok(())
}
