use serde::Serialize;
use std::fmt;

/// Decimal places kept in similarity fractions
pub const SIMILARITY_DECIMALS: i32 = 4;

/// Similarity fraction `same / total`, rounded; NaN when nothing was compared.
#[must_use]
pub fn similarity(same: usize, total: usize) -> f64 {
    if total == 0 {
        return f64::NAN;
    }
    let scale = 10f64.powi(SIMILARITY_DECIMALS);
    (same as f64 / total as f64 * scale).round() / scale
}

/// A single metric value in a comparison result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Flag(bool),
    Count(usize),
    Ratio(f64),
}

impl MetricValue {
    /// Ratio value, if this is a ratio
    #[must_use]
    pub fn as_ratio(&self) -> Option<f64> {
        match self {
            MetricValue::Ratio(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Flag(true) => write!(f, "True"),
            MetricValue::Flag(false) => write!(f, "False"),
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Ratio(r) if r.is_nan() => write!(f, "nan"),
            MetricValue::Ratio(r) => write!(f, "{r:?}"),
        }
    }
}

/// Metric values of one workbook pair
///
/// Each field is written by exactly one metric; unset fields belong to
/// metrics that did not run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_create_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_modify_time: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsame_xct: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntotal_xct: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_exact: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsame_str: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntotal_str: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nexcess_str: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_str: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsame_geo: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntotal_geo: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sim_geo: Option<f64>,
}

impl ComparisonResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Present metrics as `(key, value)`, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, MetricValue)> {
        use MetricValue::{Count, Flag, Ratio};

        // keep alphabetical
        let all = [
            ("nexcess_str", self.nexcess_str.map(Count)),
            ("nsame_geo", self.nsame_geo.map(Count)),
            ("nsame_str", self.nsame_str.map(Count)),
            ("nsame_xct", self.nsame_xct.map(Count)),
            ("ntotal_geo", self.ntotal_geo.map(Count)),
            ("ntotal_str", self.ntotal_str.map(Count)),
            ("ntotal_xct", self.ntotal_xct.map(Count)),
            ("same_create_time", self.same_create_time.map(Flag)),
            ("same_modify_time", self.same_modify_time.map(Flag)),
            ("sim_exact", self.sim_exact.map(Ratio)),
            ("sim_geo", self.sim_geo.map(Ratio)),
            ("sim_str", self.sim_str.map(Ratio)),
        ];

        all.into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect()
    }

    /// Look up a metric by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries();
        if entries.is_empty() {
            return write!(f, "No results found.");
        }

        let key_width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        writeln!(f, "ComparisonResult:")?;
        for (key, value) in entries {
            writeln!(f, "  {key:<key_width$} : {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_rounds() {
        assert_eq!(similarity(3, 4), 0.75);
        assert_eq!(similarity(1, 3), 0.3333);
        assert_eq!(similarity(2, 3), 0.6667);
        assert_eq!(similarity(5, 5), 1.0);
    }

    #[test]
    fn test_similarity_zero_total_is_nan() {
        assert!(similarity(0, 0).is_nan());
    }

    #[test]
    fn test_entries_sorted_and_filtered() {
        let result = ComparisonResult {
            sim_exact: Some(0.5),
            nsame_xct: Some(1),
            ntotal_xct: Some(2),
            same_create_time: Some(true),
            ..Default::default()
        };

        let keys: Vec<_> = result.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["nsame_xct", "ntotal_xct", "same_create_time", "sim_exact"]
        );
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_get() {
        let result = ComparisonResult {
            nexcess_str: Some(4),
            ..Default::default()
        };
        assert_eq!(result.get("nexcess_str"), Some(MetricValue::Count(4)));
        assert_eq!(result.get("sim_str"), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(MetricValue::Flag(true).to_string(), "True");
        assert_eq!(MetricValue::Flag(false).to_string(), "False");
        assert_eq!(MetricValue::Count(12).to_string(), "12");
        assert_eq!(MetricValue::Ratio(0.75).to_string(), "0.75");
        assert_eq!(MetricValue::Ratio(1.0).to_string(), "1.0");
        assert_eq!(MetricValue::Ratio(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(ComparisonResult::new().to_string(), "No results found.");
    }

    #[test]
    fn test_display_aligned() {
        let result = ComparisonResult {
            sim_geo: Some(1.0),
            same_modify_time: Some(false),
            ..Default::default()
        };
        let text = result.to_string();
        assert!(text.contains("  same_modify_time : False"));
        assert!(text.contains("  sim_geo          : 1.0"));
    }

    #[test]
    fn test_json_skips_unset_and_nulls_nan() {
        let result = ComparisonResult {
            sim_str: Some(f64::NAN),
            ntotal_str: Some(0),
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"ntotal_str": 0, "sim_str": null}));
    }
}
