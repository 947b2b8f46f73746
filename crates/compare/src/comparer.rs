use crate::error::{CompareError, Result};
use crate::metric::{Metric, MetricSet};
use crate::metrics::{
    exact_counts, geography_counts, meta_flags, string_counts, MetaFlags, StringCounts,
};
use crate::result::{similarity, ComparisonResult};
use crate::search::{select_sheet_pair, CellCounts, SheetMatch, SheetPairing};
use std::path::Path;
use xlsim_sheet::Workbook;

/// Options for a pairwise comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    /// Sheet combination reported by the exact-value and geography metrics
    pub pairing: SheetPairing,
}

impl CompareOptions {
    /// Set the sheet pairing policy
    #[must_use]
    pub fn with_pairing(mut self, pairing: SheetPairing) -> Self {
        self.pairing = pairing;
        self
    }
}

/// Compares two loaded workbooks and accumulates the metric values.
///
/// ```
/// use xlsim_compare::{Comparer, MetricSet};
/// use xlsim_sheet::{Sheet, Workbook};
///
/// let mut book1 = Workbook::new();
/// book1.add_sheet("S", Sheet::from_data(vec![vec![1, 2], vec![3, 4]])).unwrap();
/// let mut book2 = Workbook::new();
/// book2.add_sheet("S", Sheet::from_data(vec![vec![1, 2], vec![3, 5]])).unwrap();
///
/// let mut comparer = Comparer::new(book1, book2);
/// comparer.compare(&"exact".parse::<MetricSet>().unwrap());
/// assert_eq!(comparer.results().sim_exact, Some(0.75));
/// ```
#[derive(Debug)]
pub struct Comparer {
    book1: Workbook,
    book2: Workbook,
    options: CompareOptions,
    results: ComparisonResult,
}

impl Comparer {
    /// Create a comparer over two workbooks with default options
    #[must_use]
    pub fn new(book1: Workbook, book2: Workbook) -> Self {
        Self::with_options(book1, book2, CompareOptions::default())
    }

    /// Create a comparer over two workbooks
    #[must_use]
    pub fn with_options(book1: Workbook, book2: Workbook, options: CompareOptions) -> Self {
        Comparer {
            book1,
            book2,
            options,
            results: ComparisonResult::new(),
        }
    }

    /// Load both files and create a comparer
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Load`] naming the first file that fails to load.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        file1: P,
        file2: Q,
        options: CompareOptions,
    ) -> Result<Self> {
        let book1 = load(file1.as_ref())?;
        let book2 = load(file2.as_ref())?;
        Ok(Self::with_options(book1, book2, options))
    }

    /// Metric values gathered so far
    #[must_use]
    pub fn results(&self) -> &ComparisonResult {
        &self.results
    }

    /// Consume the comparer, releasing both workbooks
    #[must_use]
    pub fn into_results(self) -> ComparisonResult {
        self.results
    }

    /// Run the selected metrics in their fixed order
    pub fn compare(&mut self, metrics: &MetricSet) -> &ComparisonResult {
        for metric in metrics.iter() {
            match metric {
                Metric::Meta => {
                    self.compare_meta();
                }
                Metric::Exact => {
                    self.compare_exact();
                }
                Metric::String => {
                    self.compare_strings();
                }
                Metric::Geography => {
                    self.compare_geography();
                }
            }
        }
        &self.results
    }

    /// Compare creation and modification timestamps
    pub fn compare_meta(&mut self) -> MetaFlags {
        let flags = meta_flags(self.book1.metadata(), self.book2.metadata());
        tracing::info!(
            "Creation time identical: {}, modification time identical: {}",
            flags.same_create_time,
            flags.same_modify_time
        );

        self.results.same_create_time = Some(flags.same_create_time);
        self.results.same_modify_time = Some(flags.same_modify_time);
        flags
    }

    /// Compare cell values at aligned positions over the selected sheet pair
    pub fn compare_exact(&mut self) -> CellCounts {
        let found = select_sheet_pair(&self.book1, &self.book2, self.options.pairing, exact_counts);
        let counts = log_selection("Exact value match", found.as_ref());

        self.results.nsame_xct = Some(counts.same);
        self.results.ntotal_xct = Some(counts.total);
        self.results.sim_exact = Some(similarity(counts.same, counts.total));
        counts
    }

    /// Compare the multisets of plain-text cells of both workbooks
    pub fn compare_strings(&mut self) -> StringCounts {
        let counts = string_counts(&self.book1, &self.book2);
        tracing::info!(
            "String match: {}/{} with {} string(s) in excess",
            counts.matched,
            counts.total,
            counts.excess
        );

        self.results.nsame_str = Some(counts.matched);
        self.results.ntotal_str = Some(counts.total);
        self.results.nexcess_str = Some(counts.excess);
        self.results.sim_str = Some(similarity(counts.matched, counts.total));
        counts
    }

    /// Compare cell occupancy over the selected sheet pair
    pub fn compare_geography(&mut self) -> CellCounts {
        let found = select_sheet_pair(
            &self.book1,
            &self.book2,
            self.options.pairing,
            geography_counts,
        );
        let counts = log_selection("Geography match", found.as_ref());

        self.results.nsame_geo = Some(counts.same);
        self.results.ntotal_geo = Some(counts.total);
        self.results.sim_geo = Some(similarity(counts.same, counts.total));
        counts
    }
}

fn load(path: &Path) -> Result<Workbook> {
    Workbook::open(path).map_err(|source| CompareError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn log_selection(label: &str, found: Option<&SheetMatch<'_>>) -> CellCounts {
    match found {
        Some(found) => {
            tracing::info!(
                "{label}: {}/{} on sheets '{}' x '{}' with {} cell(s) in excess",
                found.counts.same,
                found.counts.total,
                found.sheet1,
                found.sheet2,
                found.counts.excess
            );
            found.counts
        }
        None => {
            tracing::info!("{label}: no sheet combination to compare");
            CellCounts::default()
        }
    }
}
