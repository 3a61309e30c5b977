//! # mini-weka update CLI
//!
//! Binary entry point for the `mini-weka-update` tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Running the update and reporting the outcome.
//!
//! The update logic lives in the `mini_weka_update` library crate; the
//! binary is a thin wrapper around it. Any error returned from `main` is
//! printed with its cause chain and turns into a non-zero exit status.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
