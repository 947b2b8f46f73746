use std::fmt;

/// Represents a cell value in a sheet
///
/// Formulas are kept apart from plain text so that content metrics never have
/// to guess a cell's type from its first character. Text starting with `=`
/// is a formula, whether built in memory or loaded from a file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Absent,
    Number(f64),
    Text(String),
    Formula(String),
    Boolean(bool),
}

impl CellValue {
    /// Create a formula cell, adding the leading `=` when missing.
    #[must_use]
    pub fn formula<S: Into<String>>(source: S) -> Self {
        let source = source.into();
        if source.starts_with('=') {
            CellValue::Formula(source)
        } else {
            CellValue::Formula(format!("={source}"))
        }
    }

    /// Create a text cell, routing `=`-prefixed input to a formula.
    #[must_use]
    pub fn text<S: Into<String>>(s: S) -> Self {
        let s = s.into();
        if s.starts_with('=') {
            CellValue::Formula(s)
        } else {
            CellValue::Text(s)
        }
    }

    /// Check if the cell holds nothing
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// Check if the cell holds anything, formulas included
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// Get the plain text content, if this is a non-formula string
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a number
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Absent
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => write!(f, ""),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) | CellValue::Formula(s) => write!(f, "{s}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Absent,
        }
    }
}
