use std::sync::Arc;

use hearth_advisory::{AdvisoryError, HttpGeneratorConfig, HttpNarrativeGenerator, NarrativeGenerator, Narrator};
use hearth_forecast::DEFAULT_HORIZON;
use hearth_infra::{AppConfig, ForecastSource, InMemoryForecastSource, PostgresForecastSource, SourceError};

const DEFAULT_HISTORY_MONTHS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ServicesError {
    #[error("failed to open forecast source: {0}")]
    Source(#[from] SourceError),

    #[error("failed to build advisory client: {0}")]
    Advisory(#[from] AdvisoryError),
}

/// Everything a forecast request needs besides the request itself.
#[derive(Clone)]
pub struct AppServices {
    pub source: Arc<dyn ForecastSource>,
    pub narrator: Narrator,
    pub history_months: u32,
    pub default_horizon: u32,
}

impl AppServices {
    pub fn new(source: Arc<dyn ForecastSource>, narrator: Narrator) -> Self {
        Self {
            source,
            narrator,
            history_months: DEFAULT_HISTORY_MONTHS,
            default_horizon: DEFAULT_HORIZON,
        }
    }

    /// Wire the process from configuration.
    ///
    /// Postgres when `database_url` is set, otherwise an empty in-memory
    /// source. The external generator is attached only when configured.
    pub async fn from_config(config: &AppConfig) -> Result<Self, ServicesError> {
        let source: Arc<dyn ForecastSource> = match &config.database_url {
            Some(url) => Arc::new(PostgresForecastSource::connect(url).await?),
            None => Arc::new(InMemoryForecastSource::new()),
        };

        let generator: Option<Arc<dyn NarrativeGenerator>> = match &config.advisory {
            Some(advisory) => {
                tracing::info!(model = %advisory.model, "advisory generator enabled");
                Some(Arc::new(HttpNarrativeGenerator::new(HttpGeneratorConfig {
                    endpoint: advisory.url.clone(),
                    api_key: advisory.api_key.clone(),
                    model: advisory.model.clone(),
                    timeout: advisory.timeout,
                })?))
            }
            None => None,
        };

        Ok(Self {
            source,
            narrator: Narrator::new(generator),
            history_months: config.history_months,
            default_horizon: config.default_horizon,
        })
    }
}
