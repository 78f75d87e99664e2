use serde::Deserialize;
use thiserror::Error;

use crate::models::FinancialRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid {param} '{value}': expected a number")]
    InvalidNumber { param: &'static str, value: String },
    #[error("invalid {param} '{value}': expected a year such as 2021")]
    InvalidYear { param: &'static str, value: String },
}

/// Filter bounds exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub min_revenue: Option<String>,
    pub max_revenue: Option<String>,
    pub min_net_income: Option<String>,
    pub max_net_income: Option<String>,
}

/// Validated, inclusive filter bounds. `None` means unconstrained.
///
/// Year bounds stay strings because they are compared against the first four
/// characters of a record's date, lexicographically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBounds {
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub min_revenue: Option<f64>,
    pub max_revenue: Option<f64>,
    pub min_net_income: Option<f64>,
    pub max_net_income: Option<f64>,
}

impl TryFrom<FilterParams> for FilterBounds {
    type Error = FilterError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        Ok(Self {
            start_year: parse_year("start_year", params.start_year)?,
            end_year: parse_year("end_year", params.end_year)?,
            min_revenue: parse_amount("min_revenue", params.min_revenue)?,
            max_revenue: parse_amount("max_revenue", params.max_revenue)?,
            min_net_income: parse_amount("min_net_income", params.min_net_income)?,
            max_net_income: parse_amount("max_net_income", params.max_net_income)?,
        })
    }
}

// Blank values mean no bound.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_year(param: &'static str, raw: Option<String>) -> Result<Option<String>, FilterError> {
    let Some(value) = non_empty(raw) else {
        return Ok(None);
    };
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(Some(value))
    } else {
        Err(FilterError::InvalidYear { param, value })
    }
}

fn parse_amount(param: &'static str, raw: Option<String>) -> Result<Option<f64>, FilterError> {
    let Some(value) = non_empty(raw) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(FilterError::InvalidNumber { param, value }),
    }
}

/// Narrow `records` by every present bound.
///
/// Each bound is its own pass over the survivors of the previous one, in the
/// order start_year, end_year, min_revenue, max_revenue, min_net_income,
/// max_net_income. A record missing the inspected field never passes.
pub fn apply_filters(records: &[FinancialRecord], bounds: &FilterBounds) -> Vec<FinancialRecord> {
    let mut filtered = records.to_vec();

    if let Some(start) = bounds.start_year.as_deref() {
        filtered = narrow(filtered, |r| r.year_prefix().is_some_and(|y| y >= start));
    }
    if let Some(end) = bounds.end_year.as_deref() {
        filtered = narrow(filtered, |r| r.year_prefix().is_some_and(|y| y <= end));
    }
    if let Some(min) = bounds.min_revenue {
        filtered = narrow(filtered, |r| r.revenue_value().is_some_and(|v| v >= min));
    }
    if let Some(max) = bounds.max_revenue {
        filtered = narrow(filtered, |r| r.revenue_value().is_some_and(|v| v <= max));
    }
    if let Some(min) = bounds.min_net_income {
        filtered = narrow(filtered, |r| r.net_income_value().is_some_and(|v| v >= min));
    }
    if let Some(max) = bounds.max_net_income {
        filtered = narrow(filtered, |r| r.net_income_value().is_some_and(|v| v <= max));
    }

    filtered
}

fn narrow<F>(records: Vec<FinancialRecord>, keep: F) -> Vec<FinancialRecord>
where
    F: Fn(&FinancialRecord) -> bool,
{
    records.into_iter().filter(|r| keep(r)).collect()
}
