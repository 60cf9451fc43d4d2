use axum::{Router, routing::post};

pub mod forecast;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new().route("/forecast", post(forecast::forecast))
}
