//! xreg - Entry Point
//!
//! Loads configuration, applies command line overrides, initializes
//! logging and runs the requested command.

use clap::Parser;
use xreg::Cli;
use xreg_infrastructure::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(&config.logging)?;

    let output = xreg::execute(&cli, &config)?;
    println!("{output}");
    Ok(())
}
