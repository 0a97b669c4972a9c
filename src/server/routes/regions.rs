//! Region Routes
//!
//! - GET /regions - Every element of the document
//! - GET /regions/:id - One element

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::document::{Document, Element};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

/// GET /regions
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<Document> {
    Json(state.dashboard().snapshot().await)
}

/// GET /regions/:id
pub async fn get_region(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Element>> {
    let element = state.dashboard().document().read().await.get(&id).cloned();

    element
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("Region {}", id)))
}
