//! Substitution Workbench - encrypt, decrypt and break monoalphabetic
//! substitution ciphers from the command line.

mod cli;
mod report;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point for the substitution workbench.
fn main() -> Result<()> {
    // Initialize logging on stderr so it never mixes with the menu output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
