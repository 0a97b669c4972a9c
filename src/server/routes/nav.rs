//! Navigation Routes
//!
//! - POST /nav/:tab - Validate a tab, then back to the page showing it
//! - POST /api/nav/:tab - Validate a tab, JSON response
//!
//! The active tab belongs to the viewer and travels in the page URL
//! (`/?tab=games`). These routes never touch the shared document.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use std::sync::Arc;

use crate::nav;
use crate::server::dto::{page_location, NavResponse};
use crate::server::error::ServerResult;
use crate::server::state::AppState;

/// Title of `tab`, checked against a copy of the current layout
async fn resolve(state: &AppState, tab: &str) -> ServerResult<&'static str> {
    let mut doc = state.dashboard().snapshot().await;
    Ok(nav::activate(&mut doc, tab)?)
}

/// POST /nav/:tab
pub async fn activate_and_redirect(
    State(state): State<Arc<AppState>>,
    Path(tab): Path<String>,
) -> ServerResult<Redirect> {
    resolve(&state, &tab).await?;
    Ok(Redirect::to(&page_location(Some(&tab))))
}

/// POST /api/nav/:tab
pub async fn activate(
    State(state): State<Arc<AppState>>,
    Path(tab): Path<String>,
) -> ServerResult<Json<NavResponse>> {
    let title = resolve(&state, &tab).await?;

    Ok(Json(NavResponse {
        location: page_location(Some(&tab)),
        title: title.to_string(),
        tab,
    }))
}
