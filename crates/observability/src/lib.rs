//! Process-wide tracing setup shared by the server binary and tests.

pub mod tracing;

/// Initialize process-wide tracing with the default filter.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init_with_default(tracing::DEFAULT_FILTER);
}
