//! Webserver state management
//!
//! Shared, read-mostly state handed to every request handler.

use std::time::Instant;

use crate::core::{AnalyticsEngine, Presenter};
use crate::services::Repository;

/// Core webserver state
pub struct WebServerState {
    pub repository: Repository,
    pub analytics: AnalyticsEngine,
    pub presenter: Presenter,
    pub server_start_time: Instant,
}

impl WebServerState {
    pub fn new(repository: Repository, analytics: AnalyticsEngine, presenter: Presenter) -> Self {
        Self {
            repository,
            analytics,
            presenter,
            server_start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}
