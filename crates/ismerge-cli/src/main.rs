//! ismerge - Income statement workbook merger
//!
//! Merges three income statement exports (YTD, Quarterly, Monthly) into one
//! styled XLSX workbook, one sheet per report.

use anyhow::Result;
use clap::Parser;
use ismerge_cli::{merge, source_specs, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let sources = source_specs(&cli.ytd, &cli.quarterly, &cli.monthly);
    merge(&sources, &cli.output)?;

    println!("\n✓ Successfully merged files to: {}", cli.output.display());
    Ok(())
}
