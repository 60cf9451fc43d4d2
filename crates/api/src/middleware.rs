use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use hearth_auth::JwtValidator;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).ok_or_else(unauthorized)?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        unauthorized()
    })?;

    req.extensions_mut().insert(PrincipalContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized")
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
