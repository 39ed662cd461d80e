//! Legacy Excel 2003 SpreadsheetML extractor.
//!
//! NetSuite and other report engines still export `.xls` files that are
//! actually XML: a `Workbook` root wrapping `Worksheet` > `Table` > `Row` >
//! `Cell` > `Data` elements. Cells may carry an explicit 1-based `ss:Index`
//! attribute to skip columns, so rows can be sparse.
//!
//! Only the first worksheet is read; the reports this tool merges are
//! single-sheet exports.

use ismerge_core::{CellValue, ExtractError, Grid, GridExtractor, GridRow};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// Serde mapping of the SpreadsheetML structure. Attribute names appear either
// plain or with the `ss:` prefix depending on the exporter, hence the aliases.
// Unknown elements and attributes (styles, MergeDown, document properties)
// are ignored by serde.

#[derive(Debug, Deserialize)]
struct XmlWorkbook {
    #[serde(rename = "Worksheet", default)]
    worksheets: Vec<XmlWorksheet>,
}

#[derive(Debug, Deserialize)]
struct XmlWorksheet {
    #[serde(rename = "Table", default)]
    table: XmlTable,
}

#[derive(Debug, Default, Deserialize)]
struct XmlTable {
    #[serde(rename = "Row", default)]
    rows: Vec<XmlRow>,
}

#[derive(Debug, Deserialize)]
struct XmlRow {
    #[serde(rename = "Cell", default)]
    cells: Vec<XmlCell>,
}

#[derive(Debug, Deserialize)]
struct XmlCell {
    #[serde(rename = "@Index", alias = "@ss:Index")]
    index: Option<u32>,
    #[serde(rename = "Data")]
    data: Option<XmlData>,
}

#[derive(Debug, Deserialize)]
struct XmlData {
    #[serde(rename = "$text", default)]
    value: String,
}

/// Grid extractor for SpreadsheetML sources.
pub struct LegacyXmlExtractor;

impl GridExtractor for LegacyXmlExtractor {
    fn extract(&self, path: &Path) -> Result<Grid, ExtractError> {
        let contents = fs::read_to_string(path).map_err(|source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // Some exporters prepend a UTF-8 BOM, which the XML reader rejects.
        let contents = contents.trim_start_matches('\u{feff}');

        let workbook: XmlWorkbook =
            quick_xml::de::from_str(contents).map_err(|e| ExtractError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let worksheet = workbook
            .worksheets
            .first()
            .ok_or_else(|| ExtractError::EmptyInput {
                path: path.to_path_buf(),
            })?;

        Ok(grid_from_table(&worksheet.table))
    }
}

/// Walk a table top-to-bottom, maintaining the per-row column cursor.
///
/// The cursor starts at 1 and increments after each cell; an explicit `Index`
/// attribute jumps it before the cell is emitted. Cell text is trimmed and
/// empty-after-trim cells are skipped entirely, leaving their position blank
/// rather than zero-filled.
fn grid_from_table(table: &XmlTable) -> Grid {
    let mut grid = Grid::new();
    for (i, xml_row) in table.rows.iter().enumerate() {
        let row_index = i as u32 + 1;
        let mut row = GridRow::new();
        let mut cursor: u32 = 1;
        for cell in &xml_row.cells {
            if let Some(index) = cell.index {
                cursor = index;
            }
            let text = cell.data.as_ref().map_or("", |d| d.value.trim());
            if !text.is_empty() {
                row.push(cursor, CellValue::classify(row_index, cursor, text));
            }
            cursor += 1;
        }
        grid.push_row(row);
    }
    grid
}
