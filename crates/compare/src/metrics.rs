//! Per-sheet and per-workbook tallies behind each similarity metric.

use crate::search::CellCounts;
use std::collections::HashMap;
use xlsim_sheet::{CellValue, Metadata, Sheet, Workbook};

/// Outcome of the metadata comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaFlags {
    pub same_create_time: bool,
    pub same_modify_time: bool,
}

/// Outcome of the string multiset comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringCounts {
    /// Strings of the first workbook matched one-to-one in the second
    pub matched: usize,
    /// Size of the smaller multiset
    pub total: usize,
    /// Difference between the multiset sizes
    pub excess: usize,
}

/// Compare creation and modification timestamps.
///
/// Absent timestamps only equal absent timestamps.
#[must_use]
pub fn meta_flags(meta1: &Metadata, meta2: &Metadata) -> MetaFlags {
    MetaFlags {
        same_create_time: meta1.created == meta2.created,
        same_modify_time: meta1.modified == meta2.modified,
    }
}

fn present_count<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> usize {
    cells.into_iter().filter(|c| c.is_present()).count()
}

/// Present cells in the rows one sheet has beyond the other's row count
fn unpaired_row_excess(sheet1: &Sheet, sheet2: &Sheet) -> usize {
    let tail = |longer: &Sheet, skip: usize| -> usize {
        longer.rows().skip(skip).map(|row| present_count(row)).sum()
    };
    tail(sheet1, sheet2.row_count()) + tail(sheet2, sheet1.row_count())
}

/// Exact-value tallies for one sheet combination.
///
/// Rows are paired by index. Within a row pair, absent cells are dropped from
/// each row before the remaining cells are paired by position, so values are
/// aligned by their order among non-empty cells rather than by column.
#[must_use]
pub fn exact_counts(sheet1: &Sheet, sheet2: &Sheet) -> CellCounts {
    let mut counts = CellCounts::default();

    for (row1, row2) in sheet1.rows().zip(sheet2.rows()) {
        let filled1: Vec<&CellValue> = row1.iter().filter(|c| c.is_present()).collect();
        let filled2: Vec<&CellValue> = row2.iter().filter(|c| c.is_present()).collect();

        for (a, b) in filled1.iter().zip(&filled2) {
            counts.total += 1;
            if a == b {
                counts.same += 1;
            }
        }
        counts.excess += filled1.len().abs_diff(filled2.len());
    }

    counts.excess += unpaired_row_excess(sheet1, sheet2);
    counts
}

/// Geography (occupancy) tallies for one sheet combination.
///
/// Every position compared in both sheets where occupancy agrees adds 2 to
/// `same`, once per sheet; `total` is the cell count of both sheets, so the
/// fraction stays within [0, 1] and is 1 only for identical layouts.
#[must_use]
pub fn geography_counts(sheet1: &Sheet, sheet2: &Sheet) -> CellCounts {
    let mut counts = CellCounts {
        total: sheet1.cell_count() + sheet2.cell_count(),
        ..CellCounts::default()
    };

    for (row1, row2) in sheet1.rows().zip(sheet2.rows()) {
        let shared = row1.len().min(row2.len());
        for (a, b) in row1.iter().zip(row2) {
            if a.is_present() == b.is_present() {
                counts.same += 2;
            }
        }
        counts.excess += present_count(&row1[shared..]) + present_count(&row2[shared..]);
    }

    counts.excess += unpaired_row_excess(sheet1, sheet2);
    counts
}

/// Plain-text cells of every sheet, in sheet/row/column order. Formulas are
/// not text.
fn text_cells(book: &Workbook) -> Vec<&str> {
    book.sheets()
        .flat_map(Sheet::cells)
        .filter_map(CellValue::as_text)
        .collect()
}

/// One-to-one multiset matching of the text cells of two workbooks.
#[must_use]
pub fn string_counts(book1: &Workbook, book2: &Workbook) -> StringCounts {
    string_multiset_counts(&text_cells(book1), &text_cells(book2))
}

/// Match `strings1` against `strings2`, consuming one occurrence per match.
#[must_use]
pub fn string_multiset_counts(strings1: &[&str], strings2: &[&str]) -> StringCounts {
    let mut pool: HashMap<&str, usize> = HashMap::new();
    for s in strings2 {
        *pool.entry(*s).or_default() += 1;
    }

    let mut matched = 0;
    for s in strings1 {
        if let Some(remaining) = pool.get_mut(*s) {
            if *remaining > 0 {
                *remaining -= 1;
                matched += 1;
            }
        }
    }

    StringCounts {
        matched,
        total: strings1.len().min(strings2.len()),
        excess: strings1.len().abs_diff(strings2.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn blank() -> CellValue {
        CellValue::Absent
    }

    #[test]
    fn test_exact_counts_single_difference() {
        let s1 = Sheet::from_data(vec![vec![1, 2], vec![3, 4]]);
        let s2 = Sheet::from_data(vec![vec![1, 2], vec![3, 5]]);
        let counts = exact_counts(&s1, &s2);
        assert_eq!(counts.same, 3);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.excess, 0);
        assert_eq!(counts.fraction(), 0.75);
    }

    #[test]
    fn test_exact_counts_requires_same_type() {
        let s1 = Sheet::from_data(vec![vec![CellValue::from(1), CellValue::from(true)]]);
        let s2 = Sheet::from_data(vec![vec![CellValue::from("1"), CellValue::from(true)]]);
        let counts = exact_counts(&s1, &s2);
        assert_eq!((counts.same, counts.total), (1, 2));
    }

    #[test]
    fn test_exact_counts_filters_absent_before_pairing() {
        // [_, 7] vs [7]: after dropping blanks both rows are [7]
        let s1 = Sheet::from_data(vec![vec![blank(), CellValue::from(7)]]);
        let s2 = Sheet::from_data(vec![vec![CellValue::from(7)]]);
        let counts = exact_counts(&s1, &s2);
        assert_eq!((counts.same, counts.total), (1, 1));
    }

    #[test]
    fn test_exact_counts_truncates_and_counts_excess() {
        let s1 = Sheet::from_data(vec![vec![1, 2, 3], vec![4]]);
        let s2 = Sheet::from_data(vec![vec![1, 2]]);
        let counts = exact_counts(&s1, &s2);
        assert_eq!((counts.same, counts.total), (2, 2));
        // one cell past the shorter row, one in the unpaired row
        assert_eq!(counts.excess, 2);
    }

    #[test]
    fn test_exact_counts_no_comparable_cells() {
        let s1 = Sheet::from_data(vec![vec![blank(), blank()]]);
        let s2 = Sheet::from_data(vec![vec![1, 2]]);
        let counts = exact_counts(&s1, &s2);
        assert_eq!(counts.total, 0);
        assert!(counts.fraction().is_nan());
    }

    #[test]
    fn test_geography_identical_layout() {
        let s1 = Sheet::from_data(vec![vec![CellValue::from(1), blank()], vec![blank(), CellValue::from("x")]]);
        let s2 = Sheet::from_data(vec![vec![CellValue::from(9), blank()], vec![blank(), CellValue::from("y")]]);
        let counts = geography_counts(&s1, &s2);
        assert_eq!(counts.same, 8);
        assert_eq!(counts.total, 8);
        assert_eq!(counts.fraction(), 1.0);
    }

    #[test]
    fn test_geography_mismatch() {
        let s1 = Sheet::from_data(vec![vec![CellValue::from(1), blank()]]);
        let s2 = Sheet::from_data(vec![vec![CellValue::from(1), CellValue::from(2)]]);
        let counts = geography_counts(&s1, &s2);
        assert_eq!((counts.same, counts.total), (2, 4));
    }

    #[test]
    fn test_geography_bounded_for_ragged_sheets() {
        let s1 = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5]]);
        let s2 = Sheet::from_data(vec![vec![1]]);
        let counts = geography_counts(&s1, &s2);
        assert_eq!((counts.same, counts.total), (2, 6));
        assert_eq!(counts.excess, 4);
        assert!(counts.fraction() <= 1.0);
    }

    #[test]
    fn test_geography_empty_sheets_nan() {
        let counts = geography_counts(&Sheet::new(), &Sheet::new());
        assert_eq!(counts.total, 0);
        assert!(counts.fraction().is_nan());
    }

    #[test]
    fn test_string_multiset_matching() {
        let counts = string_multiset_counts(&["a", "a", "b"], &["a", "b", "b"]);
        assert_eq!(
            counts,
            StringCounts {
                matched: 2,
                total: 3,
                excess: 0
            }
        );
    }

    #[test]
    fn test_string_duplicates_matched_once() {
        let counts = string_multiset_counts(&["a", "a", "a"], &["a"]);
        assert_eq!(counts.matched, 1);
        assert_eq!(counts.total, 1);
        assert_eq!(counts.excess, 2);
    }

    #[test]
    fn test_string_counts_skip_formulas_and_numbers() {
        let mut book1 = Workbook::new();
        book1
            .add_sheet(
                "One",
                Sheet::from_data(vec![vec![
                    CellValue::from("total"),
                    CellValue::formula("SUM(A1:A3)"),
                    CellValue::from(3),
                ]]),
            )
            .unwrap();
        book1
            .add_sheet("Two", Sheet::from_data(vec![vec!["notes"]]))
            .unwrap();

        let mut book2 = Workbook::new();
        book2
            .add_sheet(
                "Only",
                Sheet::from_data(vec![vec!["notes", "=SUM(A1:A3)", "total"]]),
            )
            .unwrap();

        let counts = string_counts(&book1, &book2);
        assert_eq!(
            counts,
            StringCounts {
                matched: 2,
                total: 2,
                excess: 0
            }
        );
    }

    #[test]
    fn test_meta_flags() {
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let flags = meta_flags(&Metadata::new(Some(t1), Some(t1)), &Metadata::new(Some(t1), Some(t2)));
        assert!(flags.same_create_time);
        assert!(!flags.same_modify_time);

        let flags = meta_flags(&Metadata::new(None, None), &Metadata::new(None, Some(t2)));
        assert!(flags.same_create_time);
        assert!(!flags.same_modify_time);
    }
}
