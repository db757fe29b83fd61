//! Binary crate for the `weather-check` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive credential configuration
//! - Running scenarios and printing the report

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let failed = cmd.run().await?;

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
