//! Chart Routes
//!
//! - GET /charts/:canvas - Configuration of the chart mounted on a canvas

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::server::dto::ChartResponse;
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

/// GET /charts/:canvas
///
/// 404 until the chart's first successful load.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(canvas): Path<String>,
) -> ServerResult<Json<ChartResponse>> {
    let instance = {
        let charts = state.dashboard().charts().lock().await;
        let found = [&charts.activity, &charts.games]
            .into_iter()
            .find(|slot| slot.canvas() == canvas)
            .and_then(|slot| slot.instance().cloned());
        found
    };

    instance
        .map(|instance| {
            Json(ChartResponse {
                canvas: instance.canvas,
                chart_id: instance.id,
                revision: instance.revision,
                config: instance.config,
            })
        })
        .ok_or_else(|| ServerError::NotFound(format!("Chart on canvas {}", canvas)))
}
