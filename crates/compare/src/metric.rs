use crate::error::CompareError;
use std::fmt;
use std::str::FromStr;

/// A similarity dimension that can be requested for a workbook pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Creation and modification timestamps
    Meta,
    /// Cell values at aligned positions
    Exact,
    /// Plain-text cell contents as a multiset
    String,
    /// Cell occupancy pattern
    Geography,
}

impl Metric {
    /// All metrics in execution order
    pub const ALL: [Metric; 4] = [Metric::Meta, Metric::Exact, Metric::String, Metric::Geography];

    /// Option-string name of the metric
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::Meta => "meta",
            Metric::Exact => "exact",
            Metric::String => "string",
            Metric::Geography => "geo",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| CompareError::UnknownMetric {
                name: s.to_string(),
            })
    }
}

/// The set of metrics to run; iteration follows [`Metric::ALL`] order.
///
/// ```
/// use xlsim_compare::{Metric, MetricSet};
///
/// let set: MetricSet = "geo, meta".parse().unwrap();
/// assert_eq!(set.iter().collect::<Vec<_>>(), vec![Metric::Meta, Metric::Geography]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSet {
    enabled: [bool; 4],
}

impl MetricSet {
    /// No metrics
    #[must_use]
    pub fn empty() -> Self {
        MetricSet { enabled: [false; 4] }
    }

    /// Every metric
    #[must_use]
    pub fn all() -> Self {
        MetricSet { enabled: [true; 4] }
    }

    /// Add a metric
    #[must_use]
    pub fn with(mut self, metric: Metric) -> Self {
        self.enabled[metric as usize] = true;
        self
    }

    #[must_use]
    pub fn contains(&self, metric: Metric) -> bool {
        self.enabled[metric as usize]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.enabled.iter().any(|e| *e)
    }

    /// Enabled metrics in execution order
    pub fn iter(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for MetricSet {
    type Err = CompareError;

    /// Parse a comma-separated list such as `meta,exact,string,geo`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(MetricSet::empty(), |set, part| Ok(set.with(part.parse()?)))
    }
}

impl fmt::Display for MetricSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(Metric::name).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all() {
        let set: MetricSet = "meta,exact,string,geo".parse().unwrap();
        assert_eq!(set, MetricSet::all());
    }

    #[test]
    fn test_parse_ignores_whitespace_and_empty() {
        let set: MetricSet = " exact ,, string ".parse().unwrap();
        assert!(set.contains(Metric::Exact));
        assert!(set.contains(Metric::String));
        assert!(!set.contains(Metric::Meta));
        assert!(!set.contains(Metric::Geography));
    }

    #[test]
    fn test_parse_unknown() {
        let result: Result<MetricSet, _> = "meta,fuzzy".parse();
        assert!(matches!(
            result,
            Err(CompareError::UnknownMetric { name }) if name == "fuzzy"
        ));
    }

    #[test]
    fn test_parse_empty_string() {
        let set: MetricSet = "".parse().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_execution_order_fixed() {
        let set: MetricSet = "geo,string,exact,meta".parse().unwrap();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, Metric::ALL.to_vec());
    }

    #[test]
    fn test_display_round_trip() {
        let set = MetricSet::empty().with(Metric::Geography).with(Metric::Meta);
        assert_eq!(set.to_string(), "meta,geo");
    }
}
