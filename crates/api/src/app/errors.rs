use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hearth_forecast::ForecastError;
use hearth_infra::SourceError;

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}

/// Request failures that reach the caller.
///
/// Internal details are logged here and never serialized.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("no active family for user")]
    FamilyNotFound,

    #[error("data source failed: {0}")]
    Source(#[from] SourceError),

    #[error("projection failed: {0}")]
    Forecast(#[from] ForecastError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::FamilyNotFound => json_error(StatusCode::NOT_FOUND, "family not found"),
            ApiError::Source(_) | ApiError::Forecast(_) => {
                tracing::error!(error = %self, "forecast request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}
