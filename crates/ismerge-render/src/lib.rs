//! # ismerge-render
//!
//! Styled XLSX output for the ismerge workbook merger.
//!
//! This crate provides:
//! - [`WorkbookBuilder`]: the destination workbook, one sheet appended per
//!   merged report, saved to memory only after all sheets are built
//! - The position-based [`style`] policy (title / header / data bands,
//!   currency amount formatting, fixed column widths, frozen header pane)
//!
//! ## Example
//!
//! ```rust
//! use ismerge_core::{CellValue, Grid, GridRow};
//! use ismerge_render::WorkbookBuilder;
//!
//! let mut grid = Grid::new();
//! let mut row = GridRow::new();
//! row.push(1, CellValue::text("Acme Corp"));
//! grid.push_row(row);
//!
//! let mut builder = WorkbookBuilder::new();
//! builder.append_sheet("IS - YTD", &grid).unwrap();
//! let xlsx_bytes = builder.save_to_buffer().unwrap();
//! assert!(!xlsx_bytes.is_empty());
//! ```

pub mod excel;
pub mod style;

pub use excel::WorkbookBuilder;
pub use style::{style_class, StyleClass};
