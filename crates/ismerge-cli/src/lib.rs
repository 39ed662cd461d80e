//! # ismerge-cli
//!
//! Command-line driver for the ismerge workbook merger: argument parsing and
//! the sequential merge pipeline (detect, extract, append sheet, save).
//!
//! The driver lives in the library so the full pipeline is testable; the
//! `ismerge` binary is a thin wrapper around [`merge`].

use anyhow::{Context, Result};
use clap::Parser;
use ismerge_core::SourceSpec;
use ismerge_parser::extract_grid;
use ismerge_render::WorkbookBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output path when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "Merged_Income_Statement.xlsx";

/// Destination sheet names, in merge order.
pub const YTD_SHEET: &str = "IS - YTD";
pub const QUARTERLY_SHEET: &str = "IS - Quarterly";
pub const MONTHLY_SHEET: &str = "IS - Monthly";

/// Merge three income statement exports into one styled workbook
#[derive(Debug, Parser)]
#[command(name = "ismerge")]
#[command(author, version, about = "Merge YTD, Quarterly and Monthly income statements into one workbook", long_about = None)]
pub struct Cli {
    /// Path to the YTD income statement export
    #[arg(long, value_name = "FILE")]
    pub ytd: PathBuf,

    /// Path to the Quarterly income statement export
    #[arg(long, value_name = "FILE")]
    pub quarterly: PathBuf,

    /// Path to the Monthly income statement export
    #[arg(long, value_name = "FILE")]
    pub monthly: PathBuf,

    /// Output workbook path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Build the three fixed merge inputs in their required order.
pub fn source_specs(ytd: &Path, quarterly: &Path, monthly: &Path) -> [SourceSpec; 3] {
    [
        SourceSpec::new(ytd, YTD_SHEET),
        SourceSpec::new(quarterly, QUARTERLY_SHEET),
        SourceSpec::new(monthly, MONTHLY_SHEET),
    ]
}

/// Run the merge pipeline: for each source in order, detect its encoding,
/// extract a grid, and append a styled sheet; then save the workbook.
///
/// The first failure aborts the whole merge with the offending source path in
/// the error chain. The workbook is serialized in memory and written to
/// `output` only after all three sheets succeed, so no partial output file is
/// left behind.
pub fn merge(sources: &[SourceSpec], output: &Path) -> Result<()> {
    let mut builder = WorkbookBuilder::new();

    for spec in sources {
        debug!(
            source = %spec.path.display(),
            sheet = %spec.sheet_name,
            "processing source"
        );
        let grid = extract_grid(&spec.path)
            .with_context(|| format!("failed to extract {}", spec.path.display()))?;
        debug!(rows = grid.row_count(), columns = grid.max_column(), "extracted grid");

        builder.append_sheet(&spec.sheet_name, &grid).with_context(|| {
            format!(
                "failed to write sheet {:?} from {}",
                spec.sheet_name,
                spec.path.display()
            )
        })?;
        println!("✓ Added {}", spec.sheet_name);
    }

    let buffer = builder
        .save_to_buffer()
        .context("failed to build output workbook")?;
    fs::write(output, buffer)
        .with_context(|| format!("failed to save output to {}", output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_specs_fixed_order() {
        let specs = source_specs(
            Path::new("ytd.xls"),
            Path::new("q.xls"),
            Path::new("m.xlsx"),
        );
        let sheets: Vec<&str> = specs.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(sheets, vec!["IS - YTD", "IS - Quarterly", "IS - Monthly"]);
        assert_eq!(specs[0].path, Path::new("ytd.xls"));
    }

    #[test]
    fn test_cli_requires_all_three_sources() {
        let result = Cli::try_parse_from(["ismerge", "--ytd", "a.xls", "--monthly", "c.xls"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults_output() {
        let cli = Cli::try_parse_from([
            "ismerge",
            "--ytd",
            "a.xls",
            "--quarterly",
            "b.xls",
            "--monthly",
            "c.xls",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_cli_accepts_explicit_output() {
        let cli = Cli::try_parse_from([
            "ismerge",
            "--ytd",
            "a.xls",
            "--quarterly",
            "b.xls",
            "--monthly",
            "c.xls",
            "--output",
            "merged.xlsx",
        ])
        .unwrap();
        assert_eq!(cli.output, PathBuf::from("merged.xlsx"));
    }
}
