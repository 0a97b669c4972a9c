//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Uptime and the outcome of the last refresh cycle

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::format::format_uptime;
use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Healthy when every panel rendered in the last cycle, unhealthy when
/// none did.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let report = state.orchestrator.last_report().await;

    let (status, last_refresh, failed_panels) = match &report {
        None => ("starting", None, Vec::new()),
        Some(report) => {
            let failed: Vec<String> = report
                .panels
                .iter()
                .filter(|p| !p.is_rendered())
                .map(|p| p.panel.to_string())
                .collect();

            let status = if failed.is_empty() {
                "healthy"
            } else if failed.len() < report.panels.len() {
                "degraded"
            } else {
                "unhealthy"
            };

            (status, Some(report.started_at), failed)
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.uptime_seconds(),
        uptime: format_uptime(chrono::Duration::seconds(state.uptime_seconds() as i64)),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cycles: state.orchestrator.cycles(),
        last_refresh,
        failed_panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
