//! Hashsweep CLI: hash a directory tree (or one file) into a CSV report.

use anyhow::Result;
use clap::Parser;
use hashsweep::engine::arg_parser::Cli;
use hashsweep::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::info!("Running time: {:?}", start_time.elapsed());
    Ok(())
}
