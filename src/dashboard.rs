//! Dashboard state
//!
//! Everything a refresh cycle touches: the backend, the document, and the
//! two chart slots.

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::backend::Backend;
use crate::charts::ChartSlots;
use crate::document::Document;
use crate::views::{self, Panel, PanelOutcome, PanelSettings};

pub struct Dashboard {
    backend: Arc<dyn Backend>,
    document: RwLock<Document>,
    charts: Mutex<ChartSlots>,
    settings: PanelSettings,
}

impl Dashboard {
    /// Create a dashboard in its initial layout
    pub fn new(backend: Arc<dyn Backend>, settings: PanelSettings) -> Self {
        Self::with_document(backend, settings, Document::dashboard())
    }

    pub fn with_document(
        backend: Arc<dyn Backend>,
        settings: PanelSettings,
        document: Document,
    ) -> Self {
        Self {
            backend,
            document: RwLock::new(document),
            charts: Mutex::new(ChartSlots::default()),
            settings,
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn document(&self) -> &RwLock<Document> {
        &self.document
    }

    /// Chart slots. Lock before the document when both are needed.
    pub fn charts(&self) -> &Mutex<ChartSlots> {
        &self.charts
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    pub async fn load_panel(&self, panel: Panel) -> PanelOutcome {
        views::load(panel, self).await
    }

    /// Load panels concurrently and wait for every one to settle
    pub async fn load_all(&self, panels: &[Panel]) -> Vec<PanelOutcome> {
        join_all(panels.iter().map(|panel| self.load_panel(*panel))).await
    }

    /// Copy of the current document
    pub async fn snapshot(&self) -> Document {
        self.document.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Endpoint;
    use crate::document::ids;
    use crate::views::tests::{dashboard, CannedBackend};

    #[tokio::test]
    async fn test_games_failure_is_isolated() {
        let dash = dashboard(
            CannedBackend::default()
                .with(
                    Endpoint::Leaderboard { limit: 10 },
                    serde_json::json!({"leaderboard": [{"username": "ana", "points": 10}]}),
                )
                .with(
                    Endpoint::UpcomingBirthdays,
                    serde_json::json!({
                        "birthdays": [{"username": "ben", "month": 3, "day": 9, "days_until": 1}]
                    }),
                ),
        );

        let outcomes = dash
            .load_all(&[Panel::Games, Panel::Leaderboard, Panel::UpcomingBirthdays])
            .await;

        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_rendered());
        assert!(outcomes[1].is_rendered());
        assert!(outcomes[2].is_rendered());

        let doc = dash.snapshot().await;
        assert!(doc.inner_html(ids::LEADERBOARD).contains("ana"));
        assert!(doc.inner_html(ids::BIRTHDAYS).contains("Tomorrow"));
        assert_eq!(doc.inner_html(ids::GAME_TOTAL), crate::views::STAT_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_decode_failure_renders_error_placeholder() {
        let dash = dashboard(CannedBackend::default().with(
            Endpoint::TopSongs { limit: 10 },
            serde_json::json!({"top_songs": [{"title": "no artist"}]}),
        ));

        let outcomes = dash.load_all(&[Panel::Music]).await;

        assert!(!outcomes[0].is_rendered());
        assert!(dash.snapshot().await.inner_html(ids::MUSIC).contains("Error loading data"));
    }
}
