//! # ismerge-parser
//!
//! Source format detection and grid extraction for ismerge.
//!
//! This crate provides:
//! - Content sniffing for the two supported source encodings
//! - Legacy Excel 2003 SpreadsheetML extractor (quick-xml, serde mode)
//! - Modern XLSX extractor (calamine)
//!
//! Both extractors normalize into the same [`ismerge_core::Grid`], so the
//! sheet writer never needs to know which encoding a report arrived in.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ismerge_parser::extract_grid;
//!
//! let grid = extract_grid(std::path::Path::new("ytd.xls"))?;
//! println!("{} rows", grid.row_count());
//! ```

pub mod legacy;
pub mod workbook;

pub use legacy::LegacyXmlExtractor;
pub use workbook::WorkbookExtractor;

use ismerge_core::{ExtractError, Grid, GridExtractor};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported source encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Excel 2003 SpreadsheetML export (NetSuite-style `.xls` that is XML)
    LegacyXml,
    /// Modern zipped XLSX container
    Workbook,
}

/// Number of leading bytes inspected when sniffing a source file.
const SNIFF_LEN: usize = 512;

/// Detect the encoding of a source file from its leading bytes.
///
/// A file is classified as [`SourceFormat::LegacyXml`] iff the prefix contains
/// both an XML declaration and a `Workbook` root token; everything else is
/// handed to the XLSX reader. The probe is read-only; extractors reopen the
/// file themselves.
pub fn detect_format(path: &Path) -> Result<SourceFormat, ExtractError> {
    let mut file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut prefix = [0u8; SNIFF_LEN];
    let read = file.read(&mut prefix).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let head = String::from_utf8_lossy(&prefix[..read]);
    if head.contains("<?xml") && head.contains("Workbook") {
        Ok(SourceFormat::LegacyXml)
    } else {
        Ok(SourceFormat::Workbook)
    }
}

/// Extract a grid from a source file, auto-detecting its encoding.
pub fn extract_grid(path: &Path) -> Result<Grid, ExtractError> {
    match detect_format(path)? {
        SourceFormat::LegacyXml => LegacyXmlExtractor.extract(path),
        SourceFormat::Workbook => WorkbookExtractor.extract(path),
    }
}
