//! Refresh Routes
//!
//! - POST /refresh - Manual refresh, then back to the page
//! - POST /api/refresh - Manual refresh, JSON report
//! - GET /api/refresh/last - Report of the most recent cycle

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use std::sync::Arc;

use crate::refresh::{RefreshReport, Trigger, TriggerOutcome};
use crate::server::dto::{PageQuery, RefreshResponse};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

/// POST /refresh
///
/// Returns to the tab the viewer came from.
pub async fn refresh_and_redirect(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Redirect {
    state.orchestrator.trigger(Trigger::Manual).await;
    Redirect::to(&query.location())
}

/// POST /api/refresh
///
/// Waits for the cycle when idle. When a cycle is already running the
/// request is coalesced into its follow-up and returns straight away.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    match state.orchestrator.trigger(Trigger::Manual).await {
        TriggerOutcome::Completed(report) => {
            tracing::info!(
                cycle = report.cycle,
                failed = report.failed(),
                "Manual refresh completed"
            );
            Json(RefreshResponse {
                status: "completed".to_string(),
                report: Some(report),
            })
        }
        TriggerOutcome::Queued => Json(RefreshResponse {
            status: "queued".to_string(),
            report: None,
        }),
        TriggerOutcome::Interrupted => Json(RefreshResponse {
            status: "interrupted".to_string(),
            report: None,
        }),
    }
}

/// GET /api/refresh/last
pub async fn last_refresh(State(state): State<Arc<AppState>>) -> ServerResult<Json<RefreshReport>> {
    state
        .orchestrator
        .last_report()
        .await
        .map(Json)
        .ok_or_else(|| ServerError::NotFound("No refresh cycle has run yet".to_string()))
}
