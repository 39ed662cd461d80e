//! Styled XLSX workbook building.
//!
//! [`WorkbookBuilder`] owns the destination workbook and a pre-built set of
//! cell formats. Each extracted grid is appended as one sheet; values are
//! written first and position-based styling, column widths, and the frozen
//! header pane are applied per the [`crate::style`] policy. Nothing touches
//! disk until [`WorkbookBuilder::save_to_buffer`] finishes the container in
//! memory, so a failed merge never leaves a partial output file behind.

use ismerge_core::{CellValue, Grid, RenderError};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};

use crate::style::{
    self, StyleClass, AMOUNT_COLUMN_WIDTH, CURRENCY_FORMAT, FROZEN_ROWS, HEADER_FILL,
    LABEL_COLUMN_WIDTH,
};

/// XLSX sheet limits, 1-based.
const MAX_ROW: u32 = 1_048_576;
const MAX_COLUMN: u32 = 16_384;

/// Destination workbook accumulating one sheet per merged report.
pub struct WorkbookBuilder {
    workbook: Workbook,
    formats: Formats,
    sheet_names: Vec<String>,
}

impl Default for WorkbookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            formats: Formats::new(),
            sheet_names: Vec::new(),
        }
    }

    /// Number of sheets appended so far.
    pub fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }

    /// Append `grid` as a new sheet named `name`.
    ///
    /// Sheet creation order determines the final sheet order; the first sheet
    /// appended becomes the active sheet when the workbook is opened.
    pub fn append_sheet(&mut self, name: &str, grid: &Grid) -> Result<(), RenderError> {
        // Sheet names are case-insensitively unique in XLSX; the library only
        // catches reuse at save time, so check up front.
        if self
            .sheet_names
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name))
        {
            return Err(RenderError::SheetCreation {
                name: name.to_string(),
                message: "sheet name already in use".to_string(),
            });
        }

        let first_sheet = self.sheet_names.is_empty();
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(name).map_err(|e| RenderError::SheetCreation {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        for (row, cell) in grid.cells() {
            if cell.column == 0 || cell.column > MAX_COLUMN || row > MAX_ROW {
                return Err(RenderError::CellAddress {
                    row,
                    column: cell.column,
                });
            }
            let r = row - 1;
            let c = (cell.column - 1) as u16;
            let format = self.formats.for_position(row, cell.column);
            let written = match (&cell.value, format) {
                (CellValue::Text(s), Some(f)) => sheet.write_with_format(r, c, s.as_str(), f),
                (CellValue::Text(s), None) => sheet.write(r, c, s.as_str()),
                (CellValue::Number(n), Some(f)) => sheet.write_with_format(r, c, *n, f),
                (CellValue::Number(n), None) => sheet.write(r, c, *n),
            };
            written.map_err(|e| match e {
                XlsxError::RowColumnLimitError => RenderError::CellAddress {
                    row,
                    column: cell.column,
                },
                other => RenderError::Save(other.to_string()),
            })?;
        }

        // Fixed widths from the reference template: wide label column, narrow
        // first amount column.
        sheet.set_column_width(0, LABEL_COLUMN_WIDTH).ok();
        sheet.set_column_width(1, AMOUNT_COLUMN_WIDTH).ok();

        // Keep titles and headers visible while the line items scroll.
        sheet.set_freeze_panes(FROZEN_ROWS, 0).ok();

        if first_sheet {
            sheet.set_active(true);
        }

        self.sheet_names.push(name.to_string());
        Ok(())
    }

    /// Finish the workbook and serialize it to an in-memory XLSX container.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, RenderError> {
        self.workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Save(e.to_string()))
    }
}

/// Pre-built formats, one per style class.
struct Formats {
    title: Format,
    header_label: Format,
    header_value: Format,
    data_label: Format,
    data_value: Format,
}

impl Formats {
    fn new() -> Self {
        let title = Format::new()
            .set_bold()
            .set_font_size(12)
            .set_align(FormatAlign::Center);

        let header_label = Format::new()
            .set_bold()
            .set_font_size(7)
            .set_background_color(HEADER_FILL)
            .set_align(FormatAlign::Left);

        let header_value = Format::new()
            .set_bold()
            .set_font_size(7)
            .set_background_color(HEADER_FILL)
            .set_align(FormatAlign::Right);

        let data_label = Format::new()
            .set_bold()
            .set_font_size(8)
            .set_align(FormatAlign::Left);

        let data_value = Format::new()
            .set_bold()
            .set_font_size(8)
            .set_align(FormatAlign::Right)
            .set_align(FormatAlign::VerticalCenter)
            .set_num_format(CURRENCY_FORMAT);

        Self {
            title,
            header_label,
            header_value,
            data_label,
            data_value,
        }
    }

    fn for_position(&self, row: u32, column: u32) -> Option<&Format> {
        match style::style_class(row, column) {
            StyleClass::Plain => None,
            StyleClass::Title => Some(&self.title),
            StyleClass::HeaderLabel => Some(&self.header_label),
            StyleClass::HeaderValue => Some(&self.header_value),
            StyleClass::DataLabel => Some(&self.data_label),
            StyleClass::DataValue => Some(&self.data_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use ismerge_core::{GridRow, SourceSpec};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new();
        let mut title = GridRow::new();
        title.push(1, CellValue::text("Acme Corp"));
        grid.push_row(title);
        for _ in 1..8 {
            grid.push_row(GridRow::new());
        }
        let mut data = GridRow::new();
        data.push(1, CellValue::text("Revenue"));
        data.push(2, CellValue::Number(1000.0));
        grid.push_row(data);
        grid
    }

    fn reopen(buffer: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(buffer)).expect("rendered workbook should open")
    }

    #[test]
    fn test_sheets_appear_in_append_order_with_no_default_sheet() {
        let mut builder = WorkbookBuilder::new();
        let grid = sample_grid();
        for spec in [
            SourceSpec::new("a.xls", "IS - YTD"),
            SourceSpec::new("b.xls", "IS - Quarterly"),
            SourceSpec::new("c.xls", "IS - Monthly"),
        ] {
            builder.append_sheet(&spec.sheet_name, &grid).unwrap();
        }
        assert_eq!(builder.sheet_count(), 3);

        let workbook = reopen(builder.save_to_buffer().unwrap());
        assert_eq!(
            workbook.sheet_names(),
            vec!["IS - YTD", "IS - Quarterly", "IS - Monthly"]
        );
    }

    #[test]
    fn test_cell_values_round_trip() {
        let mut builder = WorkbookBuilder::new();
        builder.append_sheet("IS - YTD", &sample_grid()).unwrap();

        let mut workbook = reopen(builder.save_to_buffer().unwrap());
        let range = workbook.worksheet_range("IS - YTD").unwrap();
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Acme Corp".into()))
        );
        assert_eq!(
            range.get_value((8, 0)),
            Some(&Data::String("Revenue".into()))
        );
        // The amount survives as a real number, not display text.
        assert_eq!(range.get_value((8, 1)), Some(&Data::Float(1000.0)));
    }

    #[test]
    fn test_duplicate_sheet_name_is_rejected() {
        let mut builder = WorkbookBuilder::new();
        let grid = sample_grid();
        builder.append_sheet("IS - YTD", &grid).unwrap();
        let err = builder.append_sheet("IS - YTD", &grid).unwrap_err();
        assert!(matches!(err, RenderError::SheetCreation { .. }));
    }

    #[test]
    fn test_invalid_sheet_name_is_rejected() {
        let mut builder = WorkbookBuilder::new();
        let err = builder
            .append_sheet("bad[name]", &sample_grid())
            .unwrap_err();
        assert!(matches!(err, RenderError::SheetCreation { .. }));
    }

    #[test]
    fn test_out_of_range_column_is_cell_address_error() {
        let mut grid = Grid::new();
        let mut row = GridRow::new();
        row.push(MAX_COLUMN + 1, CellValue::text("too far"));
        grid.push_row(row);

        let mut builder = WorkbookBuilder::new();
        let err = builder.append_sheet("IS - YTD", &grid).unwrap_err();
        assert!(matches!(err, RenderError::CellAddress { .. }));
    }

    #[test]
    fn test_empty_grid_still_produces_a_sheet() {
        let mut builder = WorkbookBuilder::new();
        builder.append_sheet("IS - YTD", &Grid::new()).unwrap();
        let workbook = reopen(builder.save_to_buffer().unwrap());
        assert_eq!(workbook.sheet_names(), vec!["IS - YTD"]);
    }
}
