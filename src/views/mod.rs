//! View Renderers
//!
//! One renderer per dashboard panel. Each panel fetches a single backend
//! endpoint and fully replaces its region of the document. A failed fetch
//! puts the panel's error placeholder in place and is logged; it never
//! reaches the caller, so sibling panels in the same refresh cycle are
//! unaffected.
//!
//! Every panel module keeps its markup builders pure (`render_*`) so they
//! can be tested without a backend, and exposes `load` (fetch and write)
//! plus `show_error` (write the failure placeholder).

pub mod activity;
pub mod birthdays;
pub mod games;
pub mod leaderboard;
pub mod music;
pub mod overview;
pub mod reminders;
pub mod spam;
pub mod trivia;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::charts::ActivityLabelStyle;
use crate::dashboard::Dashboard;
use crate::format::escape_html;

/// Text shown in scalar regions when their panel failed
pub const STAT_ERROR_TEXT: &str = "—";

/// A dashboard panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Overview,
    Leaderboard,
    UpcomingBirthdays,
    BirthdayCalendar,
    SpamLogs,
    Reminders,
    Activity,
    Games,
    Trivia,
    Music,
}

impl Panel {
    /// Every panel, in refresh order
    pub const ALL: [Panel; 10] = [
        Panel::Overview,
        Panel::Leaderboard,
        Panel::UpcomingBirthdays,
        Panel::BirthdayCalendar,
        Panel::SpamLogs,
        Panel::Reminders,
        Panel::Activity,
        Panel::Games,
        Panel::Trivia,
        Panel::Music,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Panel::Overview => "overview",
            Panel::Leaderboard => "leaderboard",
            Panel::UpcomingBirthdays => "upcoming_birthdays",
            Panel::BirthdayCalendar => "birthday_calendar",
            Panel::SpamLogs => "spam_logs",
            Panel::Reminders => "reminders",
            Panel::Activity => "activity",
            Panel::Games => "games",
            Panel::Trivia => "trivia",
            Panel::Music => "music",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of loading one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelOutcome {
    pub panel: Panel,
    #[serde(flatten)]
    pub status: PanelStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum PanelStatus {
    Rendered,
    Failed(String),
}

impl PanelOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self.status, PanelStatus::Rendered)
    }
}

/// Per-panel request parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelSettings {
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,

    #[serde(default = "default_spam_limit")]
    pub spam_limit: u32,

    #[serde(default = "default_spam_hours")]
    pub spam_hours: u32,

    #[serde(default = "default_music_limit")]
    pub music_limit: u32,

    #[serde(default = "default_activity_days")]
    pub activity_days: u32,

    #[serde(default)]
    pub activity_labels: ActivityLabelStyle,
}

fn default_leaderboard_limit() -> u32 {
    10
}

fn default_spam_limit() -> u32 {
    20
}

fn default_spam_hours() -> u32 {
    24
}

fn default_music_limit() -> u32 {
    10
}

fn default_activity_days() -> u32 {
    7
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            leaderboard_limit: default_leaderboard_limit(),
            spam_limit: default_spam_limit(),
            spam_hours: default_spam_hours(),
            music_limit: default_music_limit(),
            activity_days: default_activity_days(),
            activity_labels: ActivityLabelStyle::default(),
        }
    }
}

/// Load one panel, containing any failure to that panel
pub async fn load(panel: Panel, dashboard: &Dashboard) -> PanelOutcome {
    let result = match panel {
        Panel::Overview => overview::load(dashboard).await,
        Panel::Leaderboard => leaderboard::load(dashboard).await,
        Panel::UpcomingBirthdays => birthdays::load_upcoming(dashboard).await,
        Panel::BirthdayCalendar => birthdays::load_calendar(dashboard).await,
        Panel::SpamLogs => spam::load(dashboard).await,
        Panel::Reminders => reminders::load(dashboard).await,
        Panel::Activity => activity::load(dashboard).await,
        Panel::Games => games::load(dashboard).await,
        Panel::Trivia => trivia::load(dashboard).await,
        Panel::Music => music::load(dashboard).await,
    };

    match result {
        Ok(()) => PanelOutcome {
            panel,
            status: PanelStatus::Rendered,
        },
        Err(e) => {
            tracing::error!(panel = %panel, error = %e, "Error loading panel");

            let mut doc = dashboard.document().write().await;
            match panel {
                Panel::Overview => overview::show_error(&mut doc),
                Panel::Leaderboard => leaderboard::show_error(&mut doc),
                Panel::UpcomingBirthdays => birthdays::show_upcoming_error(&mut doc),
                Panel::BirthdayCalendar => birthdays::show_calendar_error(&mut doc),
                Panel::SpamLogs => spam::show_error(&mut doc),
                Panel::Reminders => reminders::show_error(&mut doc),
                Panel::Activity => activity::show_error(&mut doc),
                Panel::Games => games::show_error(&mut doc),
                Panel::Trivia => trivia::show_error(&mut doc),
                Panel::Music => music::show_error(&mut doc),
            }

            PanelOutcome {
                panel,
                status: PanelStatus::Failed(e.to_string()),
            }
        }
    }
}

/// Block-level placeholder, e.g. "No upcoming birthdays"
pub(crate) fn placeholder(message: &str) -> String {
    format!(r#"<div class="loading">{}</div>"#, escape_html(message))
}

/// Table-row placeholder spanning `columns` cells
pub(crate) fn placeholder_row(columns: usize, message: &str) -> String {
    format!(
        r#"<tr><td colspan="{}" class="loading">{}</td></tr>"#,
        columns,
        escape_html(message)
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::{Backend, Endpoint, FetchError, FetchResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Backend answering from canned JSON keyed by endpoint path.
    /// Paths without a response fail with a 500.
    #[derive(Default)]
    pub struct CannedBackend {
        responses: HashMap<&'static str, serde_json::Value>,
    }

    impl CannedBackend {
        pub fn with(mut self, endpoint: Endpoint, body: serde_json::Value) -> Self {
            self.responses.insert(endpoint.path(), body);
            self
        }
    }

    #[async_trait]
    impl Backend for CannedBackend {
        async fn get_json(&self, endpoint: Endpoint) -> FetchResult<serde_json::Value> {
            self.responses
                .get(endpoint.path())
                .cloned()
                .ok_or(FetchError::Status {
                    status: 500,
                    body: "no canned response".to_string(),
                })
        }
    }

    pub fn dashboard(backend: CannedBackend) -> Dashboard {
        Dashboard::new(Arc::new(backend), PanelSettings::default())
    }

    #[test]
    fn test_panel_names_are_unique() {
        let mut names: Vec<&str> = Panel::ALL.iter().map(Panel::name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Panel::ALL.len());
    }

    #[test]
    fn test_outcome_serialization() {
        let ok = PanelOutcome {
            panel: Panel::Games,
            status: PanelStatus::Rendered,
        };
        let failed = PanelOutcome {
            panel: Panel::Music,
            status: PanelStatus::Failed("Request timeout".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"panel": "games", "status": "rendered"})
        );
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"panel": "music", "status": "failed", "error": "Request timeout"})
        );
    }

    #[test]
    fn test_placeholders_escape_text() {
        assert_eq!(placeholder("a < b"), r#"<div class="loading">a &lt; b</div>"#);
        assert_eq!(
            placeholder_row(6, "No logs"),
            r#"<tr><td colspan="6" class="loading">No logs</td></tr>"#
        );
    }

    #[tokio::test]
    async fn test_failed_panel_shows_error_placeholder() {
        let dash = dashboard(CannedBackend::default());

        let outcome = load(Panel::Leaderboard, &dash).await;

        assert!(!outcome.is_rendered());
        let doc = dash.document().read().await;
        assert!(doc
            .inner_html(crate::document::ids::LEADERBOARD)
            .contains("Error loading data"));
    }
}
