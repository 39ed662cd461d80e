//! # ismerge-core
//!
//! Core domain model and traits for the ismerge workbook merger.
//!
//! This crate provides:
//! - The format-agnostic `Grid` / `GridRow` / `GridCell` model both source
//!   extractors normalize into
//! - The numeric reinterpretation rule shared by both extractors
//! - The `GridExtractor` trait and `SourceSpec` input descriptor
//! - Error types (`ExtractError`, `RenderError`)
//!
//! ## Example
//!
//! ```rust
//! use ismerge_core::{CellValue, Grid, GridRow};
//!
//! let mut grid = Grid::new();
//! let mut row = GridRow::new();
//! row.push(1, CellValue::text("Revenue"));
//! row.push(2, CellValue::Number(1000.0));
//! grid.push_row(row);
//!
//! assert_eq!(grid.row_count(), 1);
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Numeric Reinterpretation Rule
// ============================================================================

/// First column treated as an amount column (column 1 holds line-item labels).
pub const AMOUNT_START_COLUMN: u32 = 2;

/// First row treated as a data row (rows 1-7 hold titles and column headers).
pub const AMOUNT_START_ROW: u32 = 8;

/// A single cell value in a normalized grid.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// Raw text payload.
    Text(String),
    /// An amount reinterpreted as a number.
    Number(f64),
}

impl CellValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Classify a raw text payload at a 1-based grid position.
    ///
    /// Values inside the amount region (column >= 2, row >= 8) are parsed as
    /// floating point; on success the cell becomes numeric, otherwise it stays
    /// text. Everything outside the region is always text, regardless of
    /// content: rows 1-7 are titles/headers and column 1 is the line-item
    /// label column.
    pub fn classify(row: u32, column: u32, text: &str) -> Self {
        if row >= AMOUNT_START_ROW && column >= AMOUNT_START_COLUMN {
            if let Ok(value) = text.trim().parse::<f64>() {
                return Self::Number(value);
            }
        }
        Self::Text(text.to_string())
    }

    /// The text payload, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    /// The numeric payload, if this is a numeric cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Number(n) => Some(*n),
        }
    }
}

// ============================================================================
// Grid Model
// ============================================================================

/// A cell at an explicit 1-based column within its row.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// 1-based column index. Columns within a row need not be contiguous.
    pub column: u32,
    /// Cell payload.
    pub value: CellValue,
}

/// One row of a grid: an ordered, possibly sparse sequence of cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridRow {
    /// Cells in column order.
    pub cells: Vec<GridCell>,
}

impl GridRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell at the given 1-based column.
    pub fn push(&mut self, column: u32, value: CellValue) {
        self.cells.push(GridCell { column, value });
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The normalized, format-agnostic representation both extractors produce.
///
/// Rows are addressed by position: `rows[0]` is grid row 1. Rows may be empty
/// (a title gap in the source keeps its vertical position).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    /// Rows in top-to-bottom order.
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: GridRow) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate all cells as `(row, cell)` with 1-based row indices.
    pub fn cells(&self) -> impl Iterator<Item = (u32, &GridCell)> {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            let row_index = i as u32 + 1;
            row.cells.iter().map(move |cell| (row_index, cell))
        })
    }

    /// Highest 1-based column index present anywhere in the grid (0 if none).
    pub fn max_column(&self) -> u32 {
        self.cells().map(|(_, cell)| cell.column).max().unwrap_or(0)
    }
}

// ============================================================================
// Source Descriptors and Extraction Trait
// ============================================================================

/// One merge input: a source file and the destination sheet it feeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpec {
    /// Path to the source report.
    pub path: PathBuf,
    /// Name of the sheet this source becomes in the merged workbook.
    pub sheet_name: String,
}

impl SourceSpec {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

/// A source-format-specific reader that normalizes a report file into a `Grid`.
pub trait GridExtractor {
    fn extract(&self, path: &Path) -> Result<Grid, ExtractError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Extraction error
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no worksheets found in {path}")]
    EmptyInput { path: PathBuf },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create sheet {name:?}: {message}")]
    SheetCreation { name: String, message: String },

    #[error("cell at row {row}, column {column} is outside the sheet limits")]
    CellAddress { row: u32, column: u32 },

    #[error("failed to save workbook: {0}")]
    Save(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_amount_region_number() {
        let value = CellValue::classify(8, 2, "1234.50");
        assert_eq!(value, CellValue::Number(1234.50));
    }

    #[test]
    fn test_classify_negative_amount() {
        let value = CellValue::classify(9, 3, "-3.2");
        assert_eq!(value, CellValue::Number(-3.2));
    }

    #[test]
    fn test_classify_amount_region_non_numeric_stays_text() {
        let value = CellValue::classify(9, 2, "N/A");
        assert_eq!(value, CellValue::text("N/A"));
    }

    #[test]
    fn test_classify_label_column_never_numeric() {
        // Column 1 is the line-item label column even in data rows.
        let value = CellValue::classify(12, 1, "1000.00");
        assert_eq!(value, CellValue::text("1000.00"));
    }

    #[test]
    fn test_classify_header_rows_never_numeric() {
        // Rows 1-7 are titles/headers even in amount columns.
        let value = CellValue::classify(7, 2, "2025");
        assert_eq!(value, CellValue::text("2025"));
    }

    #[test]
    fn test_classify_region_boundary() {
        assert_eq!(CellValue::classify(8, 2, "1"), CellValue::Number(1.0));
        assert_eq!(CellValue::classify(7, 2, "1"), CellValue::text("1"));
        assert_eq!(CellValue::classify(8, 1, "1"), CellValue::text("1"));
    }

    #[test]
    fn test_classify_trims_before_parsing() {
        assert_eq!(
            CellValue::classify(10, 2, " 100 "),
            CellValue::Number(100.0)
        );
    }

    #[test]
    fn test_grid_cells_are_one_based() {
        let mut grid = Grid::new();
        grid.push_row(GridRow::new());
        let mut row = GridRow::new();
        row.push(3, CellValue::text("x"));
        grid.push_row(row);

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].0, 2);
        assert_eq!(cells[0].1.column, 3);
    }

    #[test]
    fn test_grid_max_column() {
        let mut grid = Grid::new();
        let mut row = GridRow::new();
        row.push(1, CellValue::text("a"));
        row.push(5, CellValue::text("b"));
        grid.push_row(row);
        assert_eq!(grid.max_column(), 5);
        assert_eq!(Grid::new().max_column(), 0);
    }
}
