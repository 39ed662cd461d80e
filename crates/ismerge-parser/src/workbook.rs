//! Modern XLSX extractor backed by calamine.
//!
//! Reads the first sheet of a zipped workbook container as a text matrix and
//! normalizes it through the same amount-classification rule as the legacy
//! path. Unlike SpreadsheetML there is no sparse-index concept here: every
//! position inside the used range is emitted, empty strings included.

use calamine::{open_workbook_auto, Data, Reader};
use ismerge_core::{CellValue, ExtractError, Grid, GridExtractor, GridRow};
use std::io;
use std::path::Path;

/// Grid extractor for XLSX sources.
pub struct WorkbookExtractor;

impl GridExtractor for WorkbookExtractor {
    fn extract(&self, path: &Path) -> Result<Grid, ExtractError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Open {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        })?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ExtractError::EmptyInput {
                path: path.to_path_buf(),
            })?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ExtractError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut grid = Grid::new();

        // calamine ranges start at the first used cell; pad so grid positions
        // stay absolute.
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        for _ in 0..start_row {
            grid.push_row(GridRow::new());
        }

        for (r, cells) in range.rows().enumerate() {
            let row_index = start_row + r as u32 + 1;
            let mut row = GridRow::new();
            for (c, data) in cells.iter().enumerate() {
                let column = start_col + c as u32 + 1;
                let text = cell_text(data);
                row.push(column, CellValue::classify(row_index, column, &text));
            }
            grid.push_row(row);
        }

        Ok(grid)
    }
}

/// Display form of a calamine cell, mirroring what a text-matrix read of the
/// sheet would yield.
fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => format!("{e:?}"),
    }
}
