//! JSON log output with an `RUST_LOG`-driven filter.

use tracing_subscriber::EnvFilter;

/// Applied when `RUST_LOG` is unset or unparsable. Keeps sqlx statement
/// logging quiet.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Install the JSON subscriber, falling back to `default_directives`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_default(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        ::tracing::debug!(default_directives, "tracing initialised");
    }
    installed
}
