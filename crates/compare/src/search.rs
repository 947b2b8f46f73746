//! Sheet-combination search shared by the positional metrics.
//!
//! Every sheet of the first workbook is measured against every sheet of the
//! second and one combination is reported, chosen by [`SheetPairing`].
//! Combinations are visited with the first workbook's sheet order as the
//! outer loop, and the earliest combination wins a tie, so the choice is
//! deterministic for a given pair of workbooks.

use std::cmp::Ordering;
use xlsim_sheet::{Sheet, Workbook};

/// Which sheet combination a positional metric reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SheetPairing {
    /// The most similar combination
    #[default]
    Best,
    /// The least similar combination
    Worst,
}

/// Tallies of one positional comparison between two sheets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Matching positions (weighted by the metric)
    pub same: usize,
    /// Comparable positions (weighted by the metric)
    pub total: usize,
    /// Non-empty cells left without a counterpart
    pub excess: usize,
}

impl CellCounts {
    /// Unrounded `same / total`, NaN when `total` is zero
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            f64::NAN
        } else {
            self.same as f64 / self.total as f64
        }
    }
}

/// The combination selected by [`select_sheet_pair`]
#[derive(Debug, Clone, PartialEq)]
pub struct SheetMatch<'a> {
    pub sheet1: &'a str,
    pub sheet2: &'a str,
    pub counts: CellCounts,
}

/// Ordering of two fractions under a pairing policy; `Greater` means preferred.
///
/// NaN is never preferred over a number.
fn preference(pairing: SheetPairing, candidate: f64, current: f64) -> Ordering {
    match (candidate.is_nan(), current.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => match pairing {
            SheetPairing::Best => candidate.total_cmp(&current),
            SheetPairing::Worst => current.total_cmp(&candidate),
        },
    }
}

/// Measure every sheet combination and return the one chosen by `pairing`.
///
/// Returns `None` when either workbook has no sheets.
pub fn select_sheet_pair<'a, F>(
    book1: &'a Workbook,
    book2: &'a Workbook,
    pairing: SheetPairing,
    mut measure: F,
) -> Option<SheetMatch<'a>>
where
    F: FnMut(&Sheet, &Sheet) -> CellCounts,
{
    let mut selected: Option<SheetMatch<'a>> = None;

    for sheet1 in book1.sheets() {
        for sheet2 in book2.sheets() {
            let counts = measure(sheet1, sheet2);
            tracing::debug!(
                "Sheet combination '{}' x '{}': {}/{}",
                sheet1.name(),
                sheet2.name(),
                counts.same,
                counts.total
            );

            let replace = selected.as_ref().map_or(true, |current| {
                preference(pairing, counts.fraction(), current.counts.fraction())
                    == Ordering::Greater
            });
            if replace {
                selected = Some(SheetMatch {
                    sheet1: sheet1.name(),
                    sheet2: sheet2.name(),
                    counts,
                });
            }
        }
    }

    selected
}
