//! Data Transfer Objects
//!
//! Query parameters and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::charts::{ChartConfig, ChartId};
use crate::refresh::RefreshReport;

/// Query of `GET /` and `POST /refresh`: the tab this viewer is on
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub tab: Option<String>,
}

impl PageQuery {
    /// Page URL showing this viewer's tab
    pub fn location(&self) -> String {
        page_location(self.tab.as_deref())
    }
}

/// `/` or `/?tab={tab}`
pub fn page_location(tab: Option<&str>) -> String {
    match tab {
        Some(tab) => format!("/?tab={}", urlencoding::encode(tab)),
        None => "/".to_string(),
    }
}

/// `POST /api/nav/:tab`
#[derive(Debug, Serialize)]
pub struct NavResponse {
    pub tab: String,
    pub title: String,
    /// Page URL showing the tab
    pub location: String,
}

/// `POST /api/refresh`
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// "completed", "queued" or "interrupted"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RefreshReport>,
}

/// `GET /charts/:canvas`
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub canvas: String,
    pub chart_id: ChartId,
    pub revision: u64,
    pub config: ChartConfig,
}

/// `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "starting", "healthy", "degraded" or "unhealthy"
    pub status: String,
    pub uptime_seconds: u64,
    /// Human-readable uptime, e.g. `2h 5m`
    pub uptime: String,
    pub version: String,
    pub cycles: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<DateTime<Utc>>,
    pub failed_panels: Vec<String>,
}
