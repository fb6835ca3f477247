//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod analytics;
pub mod presentation;
pub mod snapshot;

// Re-export commonly used types
pub use analytics::{AnalyticsEngine, AnalyticsReport, DashboardStats, EvaluationRollup, UNKNOWN};
pub use presentation::{Presenter, ScoreThresholds, ScoreTier};
pub use snapshot::Snapshot;
