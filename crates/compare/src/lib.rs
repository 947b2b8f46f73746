//! Similarity metrics between spreadsheet workbooks
//!
//! Compares two workbooks, or every pair of a collection of files, on four
//! independent metrics:
//!
//! - `meta`: whether creation and modification timestamps are identical
//! - `exact`: share of identical values at aligned positions
//! - `string`: one-to-one matching of the text cells of both workbooks
//! - `geo`: agreement of the cell occupancy pattern
//!
//! The positional metrics (`exact`, `geo`) measure every sheet combination
//! and report one, chosen by [`SheetPairing`].
//!
//! # Examples
//!
//! ## Comparing two files
//!
//! ```no_run
//! use xlsim_compare::{CompareOptions, Comparer, MetricSet};
//!
//! let mut comparer = Comparer::open("a.xlsx", "b.xlsx", CompareOptions::default()).unwrap();
//! let results = comparer.compare(&MetricSet::all());
//! println!("{results}");
//! ```
//!
//! ## Comparing a directory
//!
//! ```no_run
//! use xlsim_compare::{FileSource, MetricSet, MultiFileComparer, ResultTable, TableOptions};
//!
//! let mut multi = MultiFileComparer::discover(&FileSource::Directory("reports".into())).unwrap();
//! let records = multi.compare(&"exact,string".parse::<MetricSet>().unwrap()).unwrap();
//! print!("{}", ResultTable::build(records, &TableOptions::default()).to_plain());
//! ```

mod comparer;
mod discover;
mod error;
mod metric;
mod metrics;
mod multi;
mod result;
mod search;
mod table;

pub use comparer::{CompareOptions, Comparer};
pub use discover::{discover, is_spreadsheet, FileSource, RECOGNIZED_EXTENSIONS};
pub use error::{CompareError, Result};
pub use metric::{Metric, MetricSet};
pub use metrics::{
    exact_counts, geography_counts, meta_flags, string_counts, string_multiset_counts, MetaFlags,
    StringCounts,
};
pub use multi::{unordered_pairs, Execution, MultiFileComparer, PairRecord};
pub use result::{similarity, ComparisonResult, MetricValue, SIMILARITY_DECIMALS};
pub use search::{select_sheet_pair, CellCounts, SheetMatch, SheetPairing};
pub use table::{ExcessColoring, ResultTable, Style, TableCell, TableOptions};
