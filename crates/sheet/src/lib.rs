//! Workbook model and loader for xlsim
//!
//! Loads spreadsheet files through calamine into a small, read-only model: an
//! ordered set of named sheets, each a ragged row-major grid of typed cells,
//! plus the document's creation and modification timestamps.
//!
//! # Examples
//!
//! ## Building a workbook in memory
//!
//! ```
//! use xlsim_sheet::{CellValue, Sheet, Workbook};
//!
//! let mut book = Workbook::new();
//! book.add_sheet("Data", Sheet::from_data(vec![
//!     vec![CellValue::from("Name"), CellValue::from("Total")],
//!     vec![CellValue::from("Alice"), CellValue::formula("SUM(B3:B9)")],
//! ])).unwrap();
//!
//! assert_eq!(book.sheet_names(), vec!["Data"]);
//! ```
//!
//! ## Loading from disk
//!
//! ```no_run
//! use xlsim_sheet::Workbook;
//!
//! let book = Workbook::open("report.xlsx").unwrap();
//! println!("{:?}", book.metadata().modified);
//! ```

mod book;
mod cell;
mod error;
mod properties;
mod sheet;
mod xlsx;

/// Re-export workbook types.
pub use book::{Metadata, Workbook};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export core properties helpers.
pub use properties::{parse_core_properties, read_metadata};
/// Re-export sheet type.
pub use sheet::Sheet;
