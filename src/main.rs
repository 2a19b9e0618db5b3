use anyhow::Result;
use clap::Parser;
use gtally::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
