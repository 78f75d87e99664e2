use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::service::finance::FinanceService;

pub mod error;
pub mod financial_data;

pub use error::ApiError;

/// Shared state handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub finance: Arc<FinanceService>,
}

impl AppState {
    pub fn new(finance: Arc<FinanceService>) -> Self {
        Self { finance }
    }
}

/// Success envelope: `{"status": "success", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/api/financial-data",
            get(financial_data::get_financial_data),
        )
        .with_state(state)
}

async fn index() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Financial Data API is running",
    })
}
