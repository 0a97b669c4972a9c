//! Application State
//!
//! Shared state accessible by all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::Dashboard;
use crate::refresh::RefreshOrchestrator;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Refresh orchestrator, which owns the dashboard
    pub orchestrator: Arc<RefreshOrchestrator>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(orchestrator: Arc<RefreshOrchestrator>) -> Self {
        Self {
            orchestrator,
            start_time: Instant::now(),
        }
    }

    pub fn dashboard(&self) -> &Arc<Dashboard> {
        self.orchestrator.dashboard()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
