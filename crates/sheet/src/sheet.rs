use crate::cell::CellValue;

/// A sheet representing a row-major grid of cells
///
/// Rows are not required to share a length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from row data
    ///
    /// ```
    /// use xlsim_sheet::{CellValue, Sheet};
    ///
    /// let sheet = Sheet::from_data(vec![vec![1, 2], vec![3]]);
    /// assert_eq!(sheet.row_count(), 2);
    /// assert_eq!(sheet.row(1), Some(&[CellValue::Number(3.0)][..]));
    /// ```
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let data = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Sheet {
            name: "Sheet1".to_string(),
            data,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the total number of cells over all rows, absent cells included
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    /// Check if the sheet has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a row by index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> + '_ {
        self.data.iter().map(Vec::as_slice)
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &CellValue> + '_ {
        self.data.iter().flatten()
    }

    /// Get a cell by position
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Get the underlying data
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable access to the underlying data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }
}
