use reqwest::StatusCode;
use tracing::info;

use crate::config::UpstreamConfig;
use crate::models::FinancialRecord;

pub mod filters;
pub mod sorting;
pub mod statements;

pub use filters::{FilterBounds, FilterError, FilterParams};
pub use sorting::{SortDirection, SortKey};

#[derive(Debug, thiserror::Error)]
pub enum FinanceServiceError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(StatusCode),
    #[error("upstream payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected upstream payload: {0}")]
    UnexpectedShape(String),
}

/// A fully validated request for financial data: bounds plus ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementQuery {
    pub bounds: FilterBounds,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

pub struct FinanceService {
    client: reqwest::Client,
    upstream: UpstreamConfig,
}

impl FinanceService {
    /// Build a finance service whose HTTP client is bounded by the configured timeout.
    pub fn new(upstream: UpstreamConfig) -> Result<Self, FinanceServiceError> {
        let client = reqwest::Client::builder()
            .timeout(upstream.timeout)
            .connect_timeout(upstream.timeout)
            .build()
            .map_err(FinanceServiceError::Client)?;

        Ok(Self { client, upstream })
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }

    /// Fetch every record the upstream provider has, unfiltered.
    pub async fn fetch_records(&self) -> Result<Vec<FinancialRecord>, FinanceServiceError> {
        statements::fetch_financial_statements(&self.client, &self.upstream).await
    }

    /// Fetch, filter and sort financial records for one request.
    pub async fn get_financial_data(
        &self,
        query: &StatementQuery,
    ) -> Result<Vec<FinancialRecord>, FinanceServiceError> {
        let records = self.fetch_records().await?;
        let fetched = records.len();

        let result = process(
            &records,
            &query.bounds,
            query.sort_key,
            query.sort_direction,
        );

        info!(
            fetched,
            returned = result.len(),
            sort_by = query.sort_key.as_str(),
            "Processed financial records"
        );
        Ok(result)
    }
}

/// Filter then stable-sort a record list. The input is left untouched.
///
/// An empty input comes back empty without looking at the bounds.
pub fn process(
    records: &[FinancialRecord],
    bounds: &FilterBounds,
    sort_key: SortKey,
    direction: SortDirection,
) -> Vec<FinancialRecord> {
    if records.is_empty() {
        return Vec::new();
    }

    let filtered = filters::apply_filters(records, bounds);
    sorting::apply_sorting(filtered, sort_key, direction)
}

pub use FinanceServiceError as Error;
