use crate::comparer::{CompareOptions, Comparer};
use crate::discover::{discover, FileSource};
use crate::error::Result;
use crate::metric::MetricSet;
use crate::result::ComparisonResult;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How the pairs of a multi-file comparison are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    Sequential,
    /// One rayon task per pair; each task owns its workbooks
    Parallel,
}

/// The outcome of comparing one pair of files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRecord {
    pub file1: PathBuf,
    pub file2: PathBuf,
    pub results: ComparisonResult,
}

/// Every unordered pair `(i, j)` with `i < j`, in row-major order.
#[must_use]
pub fn unordered_pairs(count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
        .collect()
}

/// Pairwise comparison of every file in a collection
///
/// ```no_run
/// use xlsim_compare::{FileSource, MetricSet, MultiFileComparer};
///
/// let mut multi = MultiFileComparer::discover(&FileSource::Pattern("reports/*.xlsx".into())).unwrap();
/// multi.compare(&MetricSet::all()).unwrap();
/// for record in multi.records() {
///     println!("{} {} {:?}", record.file1.display(), record.file2.display(), record.results.sim_exact);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiFileComparer {
    files: Vec<PathBuf>,
    options: CompareOptions,
    execution: Execution,
    records: Vec<PairRecord>,
}

impl MultiFileComparer {
    /// Create a comparer over an explicit file list
    #[must_use]
    pub fn new(files: Vec<PathBuf>) -> Self {
        MultiFileComparer {
            files,
            ..Self::default()
        }
    }

    /// Create a comparer over the files of a source
    ///
    /// # Errors
    ///
    /// Returns error if the source cannot be resolved.
    pub fn discover(source: &FileSource) -> Result<Self> {
        Ok(Self::new(discover(source)?))
    }

    /// Set the per-pair comparison options
    #[must_use]
    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    /// Set how pairs are scheduled
    #[must_use]
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Files being compared
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of pairs a comparison run produces
    #[must_use]
    pub fn pair_count(&self) -> usize {
        let n = self.files.len();
        n * n.saturating_sub(1) / 2
    }

    /// Records of the last run, in pair order
    #[must_use]
    pub fn records(&self) -> &[PairRecord] {
        &self.records
    }

    /// Compare every pair of files, replacing any previous records.
    ///
    /// Each pair loads its two workbooks, runs `metrics`, and releases the
    /// workbooks before the next pair. Records keep pair order under both
    /// execution modes.
    ///
    /// # Errors
    ///
    /// Returns the first load failure; no records are kept in that case.
    pub fn compare(&mut self, metrics: &MetricSet) -> Result<&[PairRecord]> {
        let pairs = unordered_pairs(self.files.len());
        tracing::info!(
            "Comparing {} file(s) in {} pair(s) [{}]",
            self.files.len(),
            pairs.len(),
            metrics
        );

        let files = &self.files;
        let options = self.options;
        let run = |&(i, j): &(usize, usize)| compare_pair(&files[i], &files[j], options, metrics);

        self.records.clear();
        let records = match self.execution {
            Execution::Sequential => pairs.iter().map(run).collect::<Result<Vec<_>>>()?,
            Execution::Parallel => pairs.par_iter().map(run).collect::<Result<Vec<_>>>()?,
        };
        self.records = records;
        Ok(&self.records)
    }
}

fn compare_pair(
    file1: &Path,
    file2: &Path,
    options: CompareOptions,
    metrics: &MetricSet,
) -> Result<PairRecord> {
    tracing::debug!("Comparing {} with {}", file1.display(), file2.display());

    let mut comparer = Comparer::open(file1, file2, options)?;
    comparer.compare(metrics);

    Ok(PairRecord {
        file1: file1.to_path_buf(),
        file2: file2.to_path_buf(),
        results: comparer.into_results(),
    })
}
