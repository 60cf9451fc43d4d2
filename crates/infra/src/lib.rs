//! Infrastructure layer: configuration and family-scoped data access.

pub mod config;
pub mod source;

pub use config::{AdvisorySettings, AppConfig, ConfigError};
pub use source::{
    ForecastSource, InMemoryForecastSource, PostgresForecastSource, SourceError, load_inputs,
};
