use std::sync::Arc;

use axum::{Extension, Json, body::Bytes};
use chrono::Utc;

use hearth_advisory::AdvisoryStats;
use hearth_forecast::project_horizon;
use hearth_infra::load_inputs;

use crate::app::dto::{DEFAULT_ACCOUNTING_REGIME, ForecastMetadata, ForecastRequest, ForecastResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// `POST /forecast`: project the caller's family forward.
pub async fn forecast(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Bytes,
) -> Result<Json<ForecastResponse>, ApiError> {
    let req = ForecastRequest::from_body(&body).map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?;

    let now = Utc::now();
    let today = now.date_naive();
    let months = req.months.unwrap_or(services.default_horizon);
    let include_ai = req.include_ai_tips.unwrap_or(true);

    let ctx = services
        .source
        .resolve_family(principal.user_id())
        .await?
        .ok_or(ApiError::FamilyNotFound)?;

    tracing::info!(
        family_id = %ctx.family_id(),
        months,
        include_ai,
        "forecast requested"
    );

    let inputs = load_inputs(services.source.as_ref(), &ctx, today, services.history_months).await?;
    let horizon = project_horizon(&ctx, &inputs, today, months)?;

    let stats = AdvisoryStats::from_horizon(&horizon);
    let ai_tips = services.narrator.narrate(&stats, include_ai).await;

    let accounting_regime = inputs
        .settings
        .accounting_regime
        .clone()
        .unwrap_or_else(|| DEFAULT_ACCOUNTING_REGIME.to_string());

    Ok(Json(ForecastResponse {
        metadata: ForecastMetadata {
            generated_at: now,
            months_projected: horizon.projections.len(),
            historical_months: services.history_months,
            accounting_regime,
        },
        projections: horizon.projections,
        current_month_summary: horizon.current_month_summary,
        ai_tips,
    }))
}
