use crate::book::Workbook;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::properties::read_metadata;
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Absent,
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::text(s.clone()),
        // Excel serial date: days since 1899-12-30
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Build a grid from A1 to the end of the used area of both the value and
/// formula ranges. Rows and columns before the used area are padded with
/// absent cells so that grid positions match sheet positions.
///
/// Formulas take precedence over their cached values.
fn build_grid(values: &Range<Data>, formulas: &Range<String>) -> Vec<Vec<CellValue>> {
    let Some((last_row, last_col)) = [values.end(), formulas.end()]
        .into_iter()
        .flatten()
        .reduce(|(r1, c1), (r2, c2)| (r1.max(r2), c1.max(c2)))
    else {
        return Vec::new();
    };

    (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| match formulas.get_value((row, col)) {
                    Some(formula) if !formula.is_empty() => CellValue::formula(formula.as_str()),
                    _ => values
                        .get_value((row, col))
                        .map_or(CellValue::Absent, data_to_cell_value),
                })
                .collect()
        })
        .collect()
}

impl Workbook {
    /// Load every sheet of a spreadsheet file (xlsx, xlsm, xls, ods, ...)
    ///
    /// The underlying reader is dropped before this returns; the workbook is a
    /// detached in-memory copy.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or a sheet cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading workbook {}", path.display());

        let mut reader = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut book = Workbook::with_metadata(read_metadata(path));

        for sheet_name in reader.sheet_names() {
            let read_error = |message: String| SheetError::SheetRead {
                path: path.to_path_buf(),
                sheet: sheet_name.clone(),
                message,
            };

            let values = reader
                .worksheet_range(&sheet_name)
                .map_err(|e| read_error(e.to_string()))?;
            // Chart sheets and some legacy formats have no formula part
            let formulas = reader.worksheet_formula(&sheet_name).unwrap_or_default();

            let mut sheet = Sheet::with_name(&sheet_name);
            *sheet.data_mut() = build_grid(&values, &formulas);
            book.add_sheet(&sheet_name, sheet)?;
        }

        tracing::debug!(
            "Loaded {} sheet(s) from {}",
            book.sheet_count(),
            path.display()
        );
        Ok(book)
    }
}
