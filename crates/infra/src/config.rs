//! Process configuration, read once at startup from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_HISTORY_MONTHS: u32 = 3;
const DEFAULT_HORIZON: u32 = 12;
const DEFAULT_ADVISORY_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ADVISORY_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// External advisory generator settings. Present only when an endpoint is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorySettings {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// `None` selects the in-memory source.
    pub database_url: Option<String>,
    /// Trailing months (current month included) fed to the historical baseline.
    pub history_months: u32,
    pub default_horizon: u32,
    pub advisory: Option<AdvisorySettings>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or(
            "HEARTH_BIND_ADDR",
            get("HEARTH_BIND_ADDR"),
            SocketAddr::from(DEFAULT_BIND_ADDR),
        )?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            DEV_JWT_SECRET.to_string()
        });

        let database_url = get("DATABASE_URL");
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set, using in-memory forecast source");
        }

        let history_months = parse_or("HEARTH_HISTORY_MONTHS", get("HEARTH_HISTORY_MONTHS"), DEFAULT_HISTORY_MONTHS)?;
        if history_months == 0 {
            return Err(invalid("HEARTH_HISTORY_MONTHS", "0", "must be at least 1"));
        }
        let default_horizon = parse_or("HEARTH_DEFAULT_HORIZON", get("HEARTH_DEFAULT_HORIZON"), DEFAULT_HORIZON)?;

        let advisory = match get("HEARTH_ADVISORY_URL") {
            Some(url) => {
                let timeout_secs = parse_or(
                    "HEARTH_ADVISORY_TIMEOUT_SECS",
                    get("HEARTH_ADVISORY_TIMEOUT_SECS"),
                    DEFAULT_ADVISORY_TIMEOUT_SECS,
                )?;
                Some(AdvisorySettings {
                    url,
                    api_key: get("HEARTH_ADVISORY_API_KEY"),
                    model: get("HEARTH_ADVISORY_MODEL").unwrap_or_else(|| DEFAULT_ADVISORY_MODEL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            database_url,
            history_months,
            default_horizon,
            advisory,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e| invalid(key, &value, e)),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.jwt_secret, "dev-secret");
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.history_months, 3);
        assert_eq!(cfg.default_horizon, 12);
        assert_eq!(cfg.advisory, None);
    }

    #[test]
    fn advisory_enabled_by_url() {
        let cfg = config(&[
            ("HEARTH_ADVISORY_URL", "http://localhost:9000/v1/chat/completions"),
            ("HEARTH_ADVISORY_API_KEY", "k"),
            ("HEARTH_ADVISORY_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        let advisory = cfg.advisory.unwrap();
        assert_eq!(advisory.model, "gpt-4o-mini");
        assert_eq!(advisory.api_key.as_deref(), Some("k"));
        assert_eq!(advisory.timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg = config(&[("DATABASE_URL", ""), ("JWT_SECRET", "  ")]).unwrap();
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.jwt_secret, "dev-secret");
    }

    #[test]
    fn rejects_invalid_numbers() {
        let err = config(&[("HEARTH_DEFAULT_HORIZON", "twelve")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HEARTH_DEFAULT_HORIZON", .. }));

        let err = config(&[("HEARTH_HISTORY_MONTHS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "HEARTH_HISTORY_MONTHS", .. }));
    }

    #[test]
    fn rejects_invalid_bind_addr() {
        assert!(config(&[("HEARTH_BIND_ADDR", "not-an-addr")]).is_err());
    }
}
