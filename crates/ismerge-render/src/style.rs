//! Position-based styling policy for merged income statement sheets.
//!
//! The row/column thresholds are domain convention inherited from the
//! reference template (Q4 income statement workbook), not derived from the
//! data: rows 1-4 carry the company name, report name and date range, rows
//! 7-8 the column headers, and the line items start at row 9 with labels in
//! column 1 and amounts from column 2. The table lives here as an explicit
//! policy so it can be tested independently of extraction and writing.

/// Last row of the title block.
pub const TITLE_END_ROW: u32 = 4;

/// First row of the column header block.
pub const HEADER_START_ROW: u32 = 7;

/// Last row of the column header block.
pub const HEADER_END_ROW: u32 = 8;

/// First line-item row.
pub const DATA_START_ROW: u32 = 9;

/// Column holding line-item labels; everything to the right is an amount.
pub const LABEL_COLUMN: u32 = 1;

/// Width of the label column (column A) in the reference template.
pub const LABEL_COLUMN_WIDTH: f64 = 46.25;

/// Width of the first amount column (column B) in the reference template.
pub const AMOUNT_COLUMN_WIDTH: f64 = 15.25;

/// Rows kept visible above the frozen pane (data scrolls from row 8).
pub const FROZEN_ROWS: u32 = 7;

/// Accounting-style currency format for amount cells.
pub const CURRENCY_FORMAT: &str = r##""$"#,##0.00_);\("$"#,##0.00\)"##;

/// Grey fill behind the column header rows.
pub const HEADER_FILL: u32 = 0xD0D0D0;

/// Style classes a sheet position can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    /// Rows 5-6: the blank separator band, left unformatted.
    Plain,
    /// Rows 1-4: bold, centered titles.
    Title,
    /// Rows 7-8, column 1: bold shaded header, left-aligned.
    HeaderLabel,
    /// Rows 7-8, columns 2+: bold shaded header, right-aligned.
    HeaderValue,
    /// Rows 9+, column 1: bold line-item label, left-aligned.
    DataLabel,
    /// Rows 9+, columns 2+: bold amount, right-aligned, currency format.
    DataValue,
}

/// Map a 1-based sheet position to its style class.
pub fn style_class(row: u32, column: u32) -> StyleClass {
    match row {
        1..=TITLE_END_ROW => StyleClass::Title,
        HEADER_START_ROW..=HEADER_END_ROW => {
            if column == LABEL_COLUMN {
                StyleClass::HeaderLabel
            } else {
                StyleClass::HeaderValue
            }
        }
        r if r >= DATA_START_ROW => {
            if column == LABEL_COLUMN {
                StyleClass::DataLabel
            } else {
                StyleClass::DataValue
            }
        }
        _ => StyleClass::Plain,
    }
}
