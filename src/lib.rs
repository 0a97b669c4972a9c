//! # Jule Dashboard
//!
//! Polling dashboard for the Jule community bot's statistics API.
//!
//! The dashboard periodically fetches every panel's JSON endpoint,
//! renders it into an in-process document, and serves that document as a
//! web page.
//!
//! ## Modules
//!
//! - [`backend`]: Statistics API client and response schema
//! - [`document`]: Element model the renderers write into
//! - [`views`]: One renderer per dashboard panel
//! - [`charts`]: Long-lived chart instances for the two charts
//! - [`refresh`]: Refresh orchestrator and live clock
//! - [`nav`]: Tab switching
//! - [`server`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jule_dashboard::backend::{BackendConfig, HttpBackend};
//! use jule_dashboard::refresh::{RefreshConfig, RefreshOrchestrator, Trigger};
//! use jule_dashboard::{Dashboard, PanelSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(BackendConfig::default())?;
//!     let dashboard = Arc::new(Dashboard::new(Arc::new(backend), PanelSettings::default()));
//!     let orchestrator = Arc::new(RefreshOrchestrator::new(
//!         dashboard.clone(),
//!         RefreshConfig::default(),
//!     ));
//!
//!     orchestrator.trigger(Trigger::Manual).await;
//!
//!     let doc = dashboard.snapshot().await;
//!     println!("{}", doc.inner_html("stat-users"));
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod document;
pub mod format;
pub mod nav;
pub mod refresh;
pub mod server;
pub mod views;

pub use backend::{Backend, BackendConfig, Endpoint, FetchError, FetchResult, HttpBackend};

pub use charts::{ChartConfig, ChartSlot, ChartSlots, ChartSurface, ChartUpdate};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};

pub use dashboard::Dashboard;

pub use document::{Document, Element};

pub use nav::NavError;

pub use refresh::{RefreshConfig, RefreshOrchestrator, RefreshReport, Trigger, TriggerOutcome};

pub use server::{build_router, serve, AppState, ServerError};

pub use views::{Panel, PanelOutcome, PanelSettings, PanelStatus};
