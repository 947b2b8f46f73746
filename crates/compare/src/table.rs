//! Aligned result table with per-cell style tags.
//!
//! Building the table is pure; turning styles into terminal colors and
//! writing the text out is left to the caller.

use crate::error::{CompareError, Result};
use crate::multi::PairRecord;
use crate::result::MetricValue;
use std::collections::BTreeSet;

/// Prefixes of raw counters that are never shown as columns
const HIDDEN_PREFIXES: [&str; 2] = ["ntotal", "nsame"];

/// Emphasis of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    /// Files look suspiciously alike
    Alert,
    Warning,
    /// Files look distinct
    Success,
}

/// How `nexcess*` counters are styled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExcessColoring {
    /// Zero excess is `Success`, any excess is `Warning`
    #[default]
    Divergence,
    /// Zero excess is `Warning`, any excess is `Success`
    Legacy,
}

/// Options for building a [`ResultTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOptions {
    /// `(low, high)` similarity thresholds
    pub thresholds: (f64, f64),
    pub excess_coloring: ExcessColoring,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            thresholds: (0.5, 0.8),
            excess_coloring: ExcessColoring::Divergence,
        }
    }
}

impl TableOptions {
    /// Set the similarity thresholds
    ///
    /// # Errors
    ///
    /// Returns error unless `0 <= low <= high <= 1`.
    pub fn with_thresholds(mut self, low: f64, high: f64) -> Result<Self> {
        let valid = (0.0..=1.0).contains(&low) && (0.0..=1.0).contains(&high) && low <= high;
        if !valid {
            return Err(CompareError::InvalidThresholds { low, high });
        }
        self.thresholds = (low, high);
        Ok(self)
    }

    /// Set how excess counters are styled
    #[must_use]
    pub fn with_excess_coloring(mut self, excess_coloring: ExcessColoring) -> Self {
        self.excess_coloring = excess_coloring;
        self
    }

    /// Style of a metric value under these options
    #[must_use]
    pub fn style_for(&self, key: &str, value: &MetricValue) -> Style {
        match value {
            MetricValue::Flag(true) => Style::Alert,
            MetricValue::Flag(false) => Style::Success,
            MetricValue::Count(n) if key.starts_with("nexcess") => {
                match (self.excess_coloring, *n == 0) {
                    (ExcessColoring::Divergence, true) | (ExcessColoring::Legacy, false) => {
                        Style::Success
                    }
                    (ExcessColoring::Divergence, false) | (ExcessColoring::Legacy, true) => {
                        Style::Warning
                    }
                }
            }
            MetricValue::Ratio(r) if key.starts_with("sim") => {
                let (low, high) = self.thresholds;
                if r.is_nan() {
                    Style::Plain
                } else if *r > high {
                    Style::Alert
                } else if *r > low {
                    Style::Warning
                } else {
                    Style::Success
                }
            }
            _ => Style::Plain,
        }
    }
}

/// One padded cell of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Text padded to the column width
    pub text: String,
    pub style: Style,
}

impl TableCell {
    fn plain(text: String) -> Self {
        TableCell {
            text,
            style: Style::Plain,
        }
    }
}

/// Result table: one row per pair, one column per visible metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub header: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
}

fn is_hidden(key: &str) -> bool {
    HIDDEN_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

impl ResultTable {
    /// Lay out records into fixed-width columns
    #[must_use]
    pub fn build(records: &[PairRecord], options: &TableOptions) -> Self {
        let entries: Vec<Vec<(&'static str, MetricValue)>> =
            records.iter().map(|r| r.results.entries()).collect();

        let columns: Vec<&'static str> = entries
            .iter()
            .flatten()
            .map(|(key, _)| *key)
            .filter(|key| !is_hidden(key))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let file1: Vec<String> = records.iter().map(|r| format!("{} ", r.file1.display())).collect();
        let file2: Vec<String> = records.iter().map(|r| format!("{} ", r.file2.display())).collect();
        let file_width = |names: &[String], header: &str| {
            names
                .iter()
                .map(|n| n.chars().count())
                .chain([header.len() + 1])
                .max()
                .unwrap_or(0)
        };
        let file1_width = file_width(&file1, "file1");
        let file2_width = file_width(&file2, "file2");

        // column text per row, before padding
        let values: Vec<Vec<Option<(String, Style)>>> = entries
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        row.iter()
                            .find(|(key, _)| key == column)
                            .map(|(key, value)| (value.to_string(), options.style_for(key, value)))
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(c, column)| {
                values
                    .iter()
                    .filter_map(|row| row[c].as_ref().map(|(text, _)| text.chars().count()))
                    .chain([column.len()])
                    .max()
                    .unwrap_or(0)
                    + 2
            })
            .collect();

        let mut header = vec![
            TableCell::plain(pad("file1", file1_width)),
            TableCell::plain(pad("file2", file2_width)),
        ];
        header.extend(
            columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| TableCell::plain(pad(column, *width))),
        );

        let rows = values
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let mut cells = vec![
                    TableCell::plain(pad(&file1[i], file1_width)),
                    TableCell::plain(pad(&file2[i], file2_width)),
                ];
                cells.extend(row.into_iter().zip(&widths).map(|(value, width)| match value {
                    Some((text, style)) => TableCell {
                        text: pad(&text, *width),
                        style,
                    },
                    None => TableCell::plain(pad("", *width)),
                }));
                cells
            })
            .collect();

        ResultTable {
            columns: columns.into_iter().map(str::to_string).collect(),
            header,
            rows,
        }
    }

    /// Header line
    #[must_use]
    pub fn header_line(&self) -> String {
        self.header.iter().map(|c| c.text.as_str()).collect()
    }

    /// Dashed rule as long as the header
    #[must_use]
    pub fn rule(&self) -> String {
        "-".repeat(self.header_line().chars().count())
    }

    /// Render the table without styling
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.render(|cell| cell.text.clone())
    }

    /// Render the table, passing each body cell through `paint`
    pub fn render<F>(&self, mut paint: F) -> String
    where
        F: FnMut(&TableCell) -> String,
    {
        let mut out = self.header_line();
        out.push('\n');
        out.push_str(&self.rule());
        out.push('\n');
        for row in &self.rows {
            for cell in row {
                out.push_str(&paint(cell));
            }
            out.push('\n');
        }
        out
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ComparisonResult;

    fn record(file1: &str, file2: &str, results: ComparisonResult) -> PairRecord {
        PairRecord {
            file1: file1.into(),
            file2: file2.into(),
            results,
        }
    }

    fn full_result(sim: f64, excess: usize, same_time: bool) -> ComparisonResult {
        ComparisonResult {
            same_create_time: Some(same_time),
            same_modify_time: Some(false),
            nsame_xct: Some(3),
            ntotal_xct: Some(4),
            sim_exact: Some(sim),
            nsame_str: Some(1),
            ntotal_str: Some(2),
            nexcess_str: Some(excess),
            sim_str: Some(0.5),
            nsame_geo: Some(0),
            ntotal_geo: Some(0),
            sim_geo: Some(f64::NAN),
        }
    }

    #[test]
    fn test_counters_never_shown() {
        let records = vec![record("a.xlsx", "b.xlsx", full_result(0.75, 0, true))];
        let table = ResultTable::build(&records, &TableOptions::default());

        assert_eq!(
            table.columns,
            vec![
                "nexcess_str",
                "same_create_time",
                "same_modify_time",
                "sim_exact",
                "sim_geo",
                "sim_str"
            ]
        );
        let text = table.to_plain();
        assert!(!text.contains("ntotal"));
        assert!(!text.contains("nsame"));
    }

    #[test]
    fn test_layout() {
        let results = ComparisonResult {
            sim_exact: Some(0.75),
            nsame_xct: Some(3),
            ntotal_xct: Some(4),
            ..Default::default()
        };
        let records = vec![
            record("a.xlsx", "b.xlsx", results.clone()),
            record("a.xlsx", "long_name.xlsx", results),
        ];
        let text = ResultTable::build(&records, &TableOptions::default()).to_plain();

        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        let rule = "-".repeat(33);
        assert_eq!(
            lines,
            vec![
                "file1  file2          sim_exact",
                rule.as_str(),
                "a.xlsx b.xlsx         0.75",
                "a.xlsx long_name.xlsx 0.75",
            ]
        );
        // every line is padded to the full width
        assert!(text.lines().all(|line| line.len() == 33));
    }

    #[test]
    fn test_missing_key_renders_blank() {
        let records = vec![
            record("a", "b", ComparisonResult { sim_str: Some(1.0), ..Default::default() }),
            record("a", "c", ComparisonResult::default()),
        ];
        let table = ResultTable::build(&records, &TableOptions::default());
        assert_eq!(table.rows[1][2].text.trim(), "");
        assert_eq!(table.rows[1][2].style, Style::Plain);
    }

    #[test]
    fn test_nan_rendered_as_token() {
        let records = vec![record("a", "b", full_result(f64::NAN, 0, false))];
        let table = ResultTable::build(&records, &TableOptions::default());
        let sim_exact = table.columns.iter().position(|c| c == "sim_exact").unwrap() + 2;
        assert_eq!(table.rows[0][sim_exact].text.trim(), "nan");
        assert_eq!(table.rows[0][sim_exact].style, Style::Plain);
    }

    #[test]
    fn test_similarity_styles() {
        let options = TableOptions::default();
        let style = |r: f64| options.style_for("sim_exact", &MetricValue::Ratio(r));
        assert_eq!(style(0.3), Style::Success);
        assert_eq!(style(0.5), Style::Success);
        assert_eq!(style(0.6), Style::Warning);
        assert_eq!(style(0.8), Style::Warning);
        assert_eq!(style(0.95), Style::Alert);
        assert_eq!(style(f64::NAN), Style::Plain);
    }

    #[test]
    fn test_flag_styles() {
        let options = TableOptions::default();
        assert_eq!(options.style_for("same_create_time", &MetricValue::Flag(true)), Style::Alert);
        assert_eq!(options.style_for("same_modify_time", &MetricValue::Flag(false)), Style::Success);
    }

    #[test]
    fn test_excess_styles() {
        let divergence = TableOptions::default();
        assert_eq!(divergence.style_for("nexcess_str", &MetricValue::Count(0)), Style::Success);
        assert_eq!(divergence.style_for("nexcess_str", &MetricValue::Count(3)), Style::Warning);

        let legacy = TableOptions::default().with_excess_coloring(ExcessColoring::Legacy);
        assert_eq!(legacy.style_for("nexcess_str", &MetricValue::Count(0)), Style::Warning);
        assert_eq!(legacy.style_for("nexcess_str", &MetricValue::Count(3)), Style::Success);
    }

    #[test]
    fn test_custom_thresholds() {
        let options = TableOptions::default().with_thresholds(0.2, 0.4).unwrap();
        assert_eq!(options.style_for("sim_geo", &MetricValue::Ratio(0.5)), Style::Alert);
        assert!(TableOptions::default().with_thresholds(0.9, 0.1).is_err());
        assert!(TableOptions::default().with_thresholds(-0.1, 0.5).is_err());
    }

    #[test]
    fn test_render_paints_body_only() {
        let records = vec![record("a", "b", full_result(0.9, 1, true))];
        let table = ResultTable::build(&records, &TableOptions::default());
        let painted = table.render(|cell| match cell.style {
            Style::Alert => format!("<{}>", cell.text.trim_end()),
            _ => cell.text.clone(),
        });
        assert!(painted.contains("<True>"));
        assert!(painted.contains("<0.9>"));
        assert!(painted.lines().next().unwrap().starts_with("file1"));
    }
}
