//! `hearth-advisory`
//!
//! **Responsibility:** short advisory narrative for a projected horizon.
//!
//! - The external generator is optional. Every failure is recovered locally
//!   by the rule-based narrative, so the response shape never changes.
//! - Nothing here reads or writes family data; it only sees aggregate stats.

pub mod fallback;
pub mod generator;
pub mod http;
pub mod narrative;
pub mod narrator;
pub mod stats;

pub use fallback::RuleBasedNarrator;
pub use generator::NarrativeGenerator;
pub use http::{HttpGeneratorConfig, HttpNarrativeGenerator};
pub use narrative::{AdvisoryError, AdvisoryNarrative};
pub use narrator::Narrator;
pub use stats::{AdvisoryStats, CategoryTotal, MonthPreview};
