use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One reporting period's income statement figures.
///
/// All six keys are always serialized; figures the provider omitted come out
/// as `null`. Numbers keep the provider's representation (integers stay
/// integers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub date: Option<String>,
    pub revenue: Option<Number>,
    pub net_income: Option<Number>,
    pub gross_profit: Option<Number>,
    pub eps: Option<Number>,
    pub operating_income: Option<Number>,
}

impl FinancialRecord {
    /// First four characters of `date`, e.g. `"2023"` for `"2023-09-30"`.
    pub fn year_prefix(&self) -> Option<&str> {
        let date = self.date.as_deref()?;
        let end = date
            .char_indices()
            .nth(4)
            .map(|(idx, _)| idx)
            .unwrap_or(date.len());
        Some(&date[..end])
    }

    pub fn revenue_value(&self) -> Option<f64> {
        self.revenue.as_ref().and_then(Number::as_f64)
    }

    pub fn net_income_value(&self) -> Option<f64> {
        self.net_income.as_ref().and_then(Number::as_f64)
    }
}
