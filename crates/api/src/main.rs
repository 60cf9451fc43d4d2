use std::sync::Arc;

use hearth_api::app::{AppServices, build_app};
use hearth_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hearth_observability::init();

    let config = AppConfig::from_env()?;
    let services = Arc::new(AppServices::from_config(&config).await?);
    let app = build_app(config.jwt_secret.clone(), services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
