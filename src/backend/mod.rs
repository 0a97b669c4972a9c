//! Bot Backend API
//!
//! Read-only access to the bot backend's statistics endpoints.
//!
//! ## Architecture
//!
//! - **Endpoint**: the fixed set of GET endpoints and their query parameters
//! - **Backend**: the fetch seam; returns raw JSON for an endpoint
//! - **HttpBackend**: reqwest implementation of [`Backend`]
//! - **schema**: typed response shapes, validated by [`fetch`]

mod client;
mod error;
pub mod schema;

pub use client::{BackendConfig, HttpBackend};
pub use error::{FetchError, FetchResult};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Backend endpoints consumed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Overview,
    Leaderboard { limit: u32 },
    UpcomingBirthdays,
    BirthdayCalendar,
    SpamLogs { limit: u32, hours: u32 },
    Reminders,
    Activity { days: u32 },
    Games,
    Trivia,
    TopSongs { limit: u32 },
}

impl Endpoint {
    /// Path relative to the backend base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Overview => "/api/stats/overview",
            Endpoint::Leaderboard { .. } => "/api/users/leaderboard",
            Endpoint::UpcomingBirthdays => "/api/birthdays/upcoming",
            Endpoint::BirthdayCalendar => "/api/birthdays/calendar",
            Endpoint::SpamLogs { .. } => "/api/logs/spam",
            Endpoint::Reminders => "/api/reminders",
            Endpoint::Activity { .. } => "/api/activity/chart",
            Endpoint::Games => "/api/games/stats",
            Endpoint::Trivia => "/api/trivia/stats",
            Endpoint::TopSongs { .. } => "/api/music/top",
        }
    }

    /// Query parameters for this request
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match *self {
            Endpoint::Leaderboard { limit } | Endpoint::TopSongs { limit } => {
                vec![("limit", limit.to_string())]
            }
            Endpoint::SpamLogs { limit, hours } => {
                vec![("limit", limit.to_string()), ("hours", hours.to_string())]
            }
            Endpoint::Activity { days } => vec![("days", days.to_string())],
            _ => Vec::new(),
        }
    }

    /// Path with encoded query string, e.g. `/api/logs/spam?limit=20&hours=24`
    pub fn path_and_query(&self) -> String {
        let query = self.query();
        if query.is_empty() {
            return self.path().to_string();
        }

        let pairs: Vec<String> = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path(), pairs.join("&"))
    }
}

/// Source of backend JSON
///
/// Implemented over HTTP by [`HttpBackend`]; tests substitute canned
/// responses.
#[async_trait]
pub trait Backend: Send + Sync {
    /// GET an endpoint and return its JSON body
    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<serde_json::Value>;
}

/// Fetch an endpoint and validate it against its schema
pub async fn fetch<T: DeserializeOwned>(
    backend: &dyn Backend,
    endpoint: Endpoint,
) -> FetchResult<T> {
    let value = backend.get_json(endpoint).await?;

    serde_json::from_value(value).map_err(|e| FetchError::Decode {
        endpoint: endpoint.path().to_string(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::schema::OverviewStats;

    struct StaticBackend(serde_json::Value);

    #[async_trait]
    impl Backend for StaticBackend {
        async fn get_json(&self, _endpoint: Endpoint) -> FetchResult<serde_json::Value> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_path_and_query() {
        assert_eq!(Endpoint::Overview.path_and_query(), "/api/stats/overview");
        assert_eq!(
            Endpoint::Leaderboard { limit: 10 }.path_and_query(),
            "/api/users/leaderboard?limit=10"
        );
        assert_eq!(
            Endpoint::SpamLogs { limit: 20, hours: 24 }.path_and_query(),
            "/api/logs/spam?limit=20&hours=24"
        );
        assert_eq!(
            Endpoint::Activity { days: 7 }.path_and_query(),
            "/api/activity/chart?days=7"
        );
    }

    #[tokio::test]
    async fn test_fetch_decodes_schema() {
        let backend = StaticBackend(serde_json::json!({
            "total_users": 12, "total_points": 3400, "total_messages": 99,
            "messages_24h": 7, "active_reminders": 2, "total_birthdays": 5, "spam_today": 0
        }));

        let stats: OverviewStats = fetch(&backend, Endpoint::Overview).await.unwrap();
        assert_eq!(stats.total_points, 3400);
    }

    #[tokio::test]
    async fn test_fetch_reports_decode_error() {
        let backend = StaticBackend(serde_json::json!({"unexpected": true}));

        let err = fetch::<OverviewStats>(&backend, Endpoint::Overview)
            .await
            .unwrap_err();

        match err {
            FetchError::Decode { endpoint, .. } => assert_eq!(endpoint, "/api/stats/overview"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
