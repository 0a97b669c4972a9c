//! Dashboard Server
//!
//! Serves the dashboard page and its regions over HTTP, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /?tab={tab}` - Full dashboard page on the viewer's tab
//! - `POST /refresh?tab={tab}` - Manual refresh, redirects back to the page
//! - `POST /nav/:tab` - Redirects to `/?tab={tab}`
//!
//! ## Regions
//! - `GET /regions` - Every element of the document
//! - `GET /regions/:id` - One element
//! - `GET /charts/:canvas` - Chart mounted on a canvas
//!
//! ## API
//! - `POST /api/refresh` - Manual refresh, JSON report
//! - `GET /api/refresh/last` - Last refresh report
//! - `POST /api/nav/:tab` - Tab title and page URL, JSON response
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(routes::page::index))
        .route("/refresh", post(routes::refresh::refresh_and_redirect))
        .route("/nav/:tab", post(routes::nav::activate_and_redirect))
        .route("/regions", get(routes::regions::list_regions))
        .route("/regions/:id", get(routes::regions::get_region))
        .route("/charts/:canvas", get(routes::charts::get_chart));

    let api_routes = Router::new()
        .route("/refresh", post(routes::refresh::refresh))
        .route("/refresh/last", get(routes::refresh::last_refresh))
        .route("/nav/:tab", post(routes::nav::activate));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    page_routes
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server, returning once a shutdown signal arrives
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ServerError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Endpoint;
    use crate::dashboard::Dashboard;
    use crate::refresh::{RefreshConfig, RefreshOrchestrator};
    use crate::views::tests::CannedBackend;
    use crate::views::PanelSettings;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let backend = CannedBackend::default()
            .with(
                Endpoint::Leaderboard { limit: 10 },
                serde_json::json!({"leaderboard": [{"username": "ana", "points": 1500}]}),
            )
            .with(
                Endpoint::Activity { days: 7 },
                serde_json::json!({"activity": [{"date": "2026-10-15", "count": 12}]}),
            );
        let dashboard = Arc::new(Dashboard::new(Arc::new(backend), PanelSettings::default()));
        let orchestrator = Arc::new(RefreshOrchestrator::new(dashboard, RefreshConfig::default()));

        build_router(AppState::new(orchestrator))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_test_app();

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="leaderboard-body""#));
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app.oneshot(get("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_before_first_cycle() {
        let app = create_test_app();

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "starting");
    }

    #[tokio::test]
    async fn test_region_lookup() {
        let app = create_test_app();

        let found = app.clone().oneshot(get("/regions/page-title")).await.unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_json(found).await["content"]["value"], "Dashboard Overview");

        let missing = app.oneshot(get("/regions/missing")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body = body_json(missing).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn shared_title(app: &Router) -> serde_json::Value {
        let response = app.clone().oneshot(get("/regions/page-title")).await.unwrap();
        body_json(response).await["content"]["value"].clone()
    }

    #[tokio::test]
    async fn test_nav_api() {
        let app = create_test_app();

        let response = app.clone().oneshot(post("/api/nav/games")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tab"], "games");
        assert_eq!(body["title"], "Games Arena");
        assert_eq!(body["location"], "/?tab=games");

        let unknown = app.clone().oneshot(post("/api/nav/settings")).await.unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        assert_eq!(shared_title(&app).await, "Dashboard Overview");
    }

    #[tokio::test]
    async fn test_nav_form_redirects_to_tab_page() {
        let app = create_test_app();

        let response = app.clone().oneshot(post("/nav/logs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/?tab=logs");

        assert_eq!(shared_title(&app).await, "Dashboard Overview");
    }

    #[tokio::test]
    async fn test_each_viewer_keeps_their_tab() {
        let app = create_test_app();

        let games = body_text(app.clone().oneshot(get("/?tab=games")).await.unwrap()).await;
        let plain = body_text(app.clone().oneshot(get("/")).await.unwrap()).await;

        assert!(games.contains("<title>Games Arena - Jule</title>"));
        assert!(games.contains(r#"<section id="games" class="active view-section">"#));
        assert!(plain.contains("<title>Dashboard Overview - Jule</title>"));
        assert!(plain.contains(r#"<section id="games" class="view-section">"#));

        let unknown = app.oneshot(get("/?tab=settings")).await.unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_refresh_form_returns_to_tab() {
        let app = create_test_app();

        let response = app.oneshot(post("/refresh?tab=music")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/?tab=music");
    }

    #[tokio::test]
    async fn test_refresh_then_inspect() {
        let app = create_test_app();

        let none_yet = app.clone().oneshot(get("/api/refresh/last")).await.unwrap();
        assert_eq!(none_yet.status(), StatusCode::NOT_FOUND);

        let response = app.clone().oneshot(post("/api/refresh")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["report"]["cycle"], 1);
        assert_eq!(body["report"]["trigger"], "manual");

        let last = app.clone().oneshot(get("/api/refresh/last")).await.unwrap();
        assert_eq!(last.status(), StatusCode::OK);

        let chart = app.clone().oneshot(get("/charts/activityChart")).await.unwrap();
        assert_eq!(chart.status(), StatusCode::OK);
        assert_eq!(body_json(chart).await["config"]["type"], "line");

        let health = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(body_json(health).await["status"], "degraded");
    }

    #[tokio::test]
    async fn test_chart_not_mounted_yet() {
        let app = create_test_app();

        let response = app.oneshot(get("/charts/gamesChart")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
