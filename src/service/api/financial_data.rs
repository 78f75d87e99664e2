use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::models::FinancialRecord;
use crate::service::api::{ApiError, ApiResponse, AppState};
use crate::service::finance::{
    FilterBounds, FilterError, FilterParams, SortDirection, SortKey, StatementQuery,
};

const DEFAULT_SORT_DIRECTION: &str = "desc";

/// Query string of `GET /api/financial-data`. Everything arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialDataQuery {
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub min_revenue: Option<String>,
    pub max_revenue: Option<String>,
    pub min_net_income: Option<String>,
    pub max_net_income: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl TryFrom<FinancialDataQuery> for StatementQuery {
    type Error = FilterError;

    fn try_from(query: FinancialDataQuery) -> Result<Self, Self::Error> {
        let sort_key = SortKey::parse(query.sort_by.as_deref());
        let sort_direction = SortDirection::parse(
            query
                .sort_direction
                .as_deref()
                .unwrap_or(DEFAULT_SORT_DIRECTION),
        );

        let bounds = FilterBounds::try_from(FilterParams {
            start_year: query.start_year,
            end_year: query.end_year,
            min_revenue: query.min_revenue,
            max_revenue: query.max_revenue,
            min_net_income: query.min_net_income,
            max_net_income: query.max_net_income,
        })?;

        Ok(Self {
            bounds,
            sort_key,
            sort_direction,
        })
    }
}

/// `GET /api/financial-data`
///
/// The query is validated before the upstream provider is contacted.
pub async fn get_financial_data(
    State(state): State<AppState>,
    query: Result<Query<FinancialDataQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<FinancialRecord>>>, ApiError> {
    let Query(query) = query?;
    let request = StatementQuery::try_from(query)?;

    info!(
        bounds = ?request.bounds,
        sort_by = request.sort_key.as_str(),
        direction = ?request.sort_direction,
        "Serving financial data request"
    );

    let data = state.finance.get_financial_data(&request).await?;
    Ok(Json(ApiResponse::success(data)))
}
