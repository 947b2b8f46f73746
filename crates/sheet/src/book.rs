use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Document timestamps recorded in a workbook's core properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metadata {
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    #[must_use]
    pub fn new(created: Option<DateTime<Utc>>, modified: Option<DateTime<Utc>>) -> Self {
        Self { created, modified }
    }
}

/// A workbook containing named sheets (preserves sheet order) and metadata
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: IndexMap<String, Sheet>,
    metadata: Metadata,
}

impl Workbook {
    /// Create a new empty workbook
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workbook carrying the given metadata
    #[must_use]
    pub fn with_metadata(metadata: Metadata) -> Self {
        Workbook {
            sheets: IndexMap::new(),
            metadata,
        }
    }

    /// Get the document metadata
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Replace the document metadata
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Iterate sheets in order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> + '_ {
        self.sheets.values()
    }

    /// Add a sheet to the workbook
    pub fn add_sheet(&mut self, name: &str, sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }

        let mut sheet = sheet;
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_order_preserved() {
        let mut book = Workbook::new();
        book.add_sheet("Zeta", Sheet::new()).unwrap();
        book.add_sheet("Alpha", Sheet::new()).unwrap();

        assert_eq!(book.sheet_names(), vec!["Zeta", "Alpha"]);
        let names: Vec<_> = book.sheets().map(Sheet::name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let mut book = Workbook::new();
        book.add_sheet("Data", Sheet::new()).unwrap();
        let result = book.add_sheet("Data", Sheet::new());
        assert!(matches!(result, Err(SheetError::SheetAlreadyExists { .. })));
    }

    #[test]
    fn test_missing_sheet() {
        let book = Workbook::new();
        assert!(matches!(
            book.get_sheet("Nope"),
            Err(SheetError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn test_metadata_defaults_absent() {
        let book = Workbook::new();
        assert_eq!(book.metadata().created, None);
        assert_eq!(book.metadata().modified, None);
    }
}
