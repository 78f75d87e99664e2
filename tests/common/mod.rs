#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::Number;
use tokio::net::TcpListener;

use financial_data_api::config::UpstreamConfig;
use financial_data_api::models::FinancialRecord;
use financial_data_api::service::api::{self, AppState};
use financial_data_api::service::finance::FinanceService;

pub const TEST_API_KEY: &str = "test-key-123";

pub const SAMPLE_PAYLOAD: &str = r#"[
    {"date": "2023-09-30", "symbol": "AAPL", "revenue": 383285000000, "netIncome": 96995000000, "grossProfit": 169148000000, "eps": 6.16, "operatingIncome": 114301000000},
    {"date": "2022-09-24", "symbol": "AAPL", "revenue": 394328000000, "netIncome": 99803000000, "grossProfit": 170782000000, "eps": 6.15, "operatingIncome": 119437000000},
    {"date": "2021-09-25", "symbol": "AAPL", "revenue": 365817000000, "netIncome": 94680000000, "grossProfit": 152836000000, "eps": 5.67, "operatingIncome": 108949000000},
    {"date": "2020-09-26", "symbol": "AAPL", "revenue": 274515000000, "netIncome": 57411000000, "grossProfit": 104956000000, "eps": 3.31, "operatingIncome": 66288000000}
]"#;

pub fn record(date: &str, revenue: Option<i64>, net_income: Option<i64>) -> FinancialRecord {
    FinancialRecord {
        date: Some(date.to_string()),
        revenue: revenue.map(Number::from),
        net_income: net_income.map(Number::from),
        gross_profit: None,
        eps: None,
        operating_income: None,
    }
}

pub fn dates(records: &[FinancialRecord]) -> Vec<&str> {
    records.iter().filter_map(|r| r.date.as_deref()).collect()
}

pub fn upstream_config(base_url: String) -> UpstreamConfig {
    UpstreamConfig {
        base_url,
        api_key: TEST_API_KEY.to_string(),
        timeout: Duration::from_secs(5),
    }
}

/// Serve a fake provider that answers `status` + `body` when the API key
/// matches, and 401 otherwise. Returns the base URL to configure.
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        "/income-statement/AAPL",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            if params.get("apikey").map(String::as_str) != Some(TEST_API_KEY) {
                return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
            }
            (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
        }),
    );

    let addr = serve(app).await;
    format!("http://{addr}/income-statement/AAPL?period=annual")
}

/// A base URL pointing at a port nobody listens on.
pub async fn unreachable_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/income-statement/AAPL?period=annual")
}

/// Start the real API router in front of `upstream_base_url`. Returns the API
/// root, e.g. `http://127.0.0.1:34567`.
pub async fn spawn_app(upstream_base_url: String) -> String {
    let finance = FinanceService::new(upstream_config(upstream_base_url))
        .expect("failed to build FinanceService");
    let app = api::router(AppState::new(Arc::new(finance)));

    let addr = serve(app).await;
    format!("http://{addr}")
}

async fn serve(app: Router) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });
    addr
}
