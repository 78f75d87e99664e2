use std::cmp::Ordering;

use crate::models::FinancialRecord;

/// Field the result set is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Revenue,
    NetIncome,
}

impl SortKey {
    /// Resolve a raw `sort_by` value; anything unrecognized falls back to `Date`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("revenue") => Self::Revenue,
            Some("netIncome") => Self::NetIncome,
            _ => Self::Date,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Revenue => "revenue",
            Self::NetIncome => "netIncome",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Only a case-insensitive `desc` means descending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// Stable sort by `key`. Records with equal keys keep their relative order in
/// both directions; missing values sort before present ones when ascending.
pub fn apply_sorting(
    records: Vec<FinancialRecord>,
    key: SortKey,
    direction: SortDirection,
) -> Vec<FinancialRecord> {
    let mut sorted = records;
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &FinancialRecord, b: &FinancialRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Revenue => compare_values(a.revenue_value(), b.revenue_value()),
        SortKey::NetIncome => compare_values(a.net_income_value(), b.net_income_value()),
    }
}

fn compare_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
