use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::service::finance::{FilterError, FinanceServiceError};

/// Everything a request can fail with, mapped to an HTTP status at the boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidFilter(#[from] FilterError),
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error("financial data provider unavailable: {0}")]
    Upstream(#[from] FinanceServiceError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFilter(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(FinanceServiceError::Client(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, "Request failed: {}", self);
        } else {
            warn!(%status, "Rejected request: {}", self);
        }

        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
