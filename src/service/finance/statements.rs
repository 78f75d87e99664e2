use reqwest::StatusCode;
use serde_json::{Map, Number, Value};
use tracing::{debug, info, warn};

use crate::config::UpstreamConfig;
use crate::models::FinancialRecord;
use crate::service::finance::FinanceServiceError;

const BODY_PREVIEW_BYTES: usize = 500;

/// Fetch the full statement history from the configured upstream endpoint.
///
/// Exactly one GET is issued; there is no retry. Filtering happens later, on
/// the complete dataset.
pub async fn fetch_financial_statements(
    client: &reqwest::Client,
    upstream: &UpstreamConfig,
) -> Result<Vec<FinancialRecord>, FinanceServiceError> {
    let redacted = upstream.redacted_url();
    info!(url = %redacted, "Fetching financial statements from upstream");

    let resp = client
        .get(upstream.request_url())
        .send()
        .await
        .map_err(|e| {
            let e = e.without_url();
            warn!(url = %redacted, "Upstream request failed: {}", e);
            FinanceServiceError::Request(e)
        })?;

    let status = resp.status();
    info!(%status, "Upstream responded");

    if status != StatusCode::OK {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "unable to read body".to_string());
        warn!(
            %status,
            "Upstream returned error status; body preview: {}",
            preview(body.as_bytes())
        );
        return Err(FinanceServiceError::Status(status));
    }

    let raw_bytes = resp.bytes().await.map_err(|e| {
        let e = e.without_url();
        warn!("Failed to read upstream body: {}", e);
        FinanceServiceError::Request(e)
    })?;
    debug!("Raw upstream payload: {}", preview(&raw_bytes));

    let records = normalize_payload(&raw_bytes).inspect_err(|e| {
        warn!("Failed to normalize upstream payload: {}; body preview: {}", e, preview(&raw_bytes));
    })?;

    info!(count = records.len(), "Normalized upstream financial statements");
    Ok(records)
}

/// Turn a raw upstream body into records.
///
/// The body must be a JSON array of objects. Each object contributes the six
/// known fields; anything else it carries is dropped, and fields that are
/// missing or of the wrong type become `None`.
pub fn normalize_payload(raw: &[u8]) -> Result<Vec<FinancialRecord>, FinanceServiceError> {
    let payload: Value = serde_json::from_slice(raw)?;

    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(FinanceServiceError::UnexpectedShape(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(map) => Ok(normalize_record(&map)),
            other => Err(FinanceServiceError::UnexpectedShape(format!(
                "element {idx} is {}, expected an object",
                json_kind(&other)
            ))),
        })
        .collect()
}

fn normalize_record(map: &Map<String, Value>) -> FinancialRecord {
    FinancialRecord {
        date: map.get("date").and_then(Value::as_str).map(str::to_string),
        revenue: number_field(map, "revenue"),
        net_income: number_field(map, "netIncome"),
        gross_profit: number_field(map, "grossProfit"),
        eps: number_field(map, "eps"),
        operating_income: number_field(map, "operatingIncome"),
    }
}

fn number_field(map: &Map<String, Value>, key: &str) -> Option<Number> {
    match map.get(key) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn preview(raw: &[u8]) -> String {
    String::from_utf8_lossy(&raw[..raw.len().min(BODY_PREVIEW_BYTES)]).into_owned()
}
