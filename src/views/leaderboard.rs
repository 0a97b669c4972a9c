//! Points leaderboard

use super::placeholder_row;
use crate::backend::schema::{LeaderboardEntry, LeaderboardResponse};
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::{escape_html, format_number};

const COLUMNS: usize = 3;

/// Badge class for a zero-based leaderboard position
pub fn rank_class(index: usize) -> &'static str {
    match index {
        0 => "rank-1",
        1 => "rank-2",
        2 => "rank-3",
        _ => "rank-other",
    }
}

/// Table rows for the leaderboard, ranked by position
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return placeholder_row(COLUMNS, "No users yet");
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                r#"<tr class="leaderboard-item"><td><span class="rank-badge {}">{}</span></td><td><span class="user-name">{}</span></td><td class="user-points">{}</td></tr>"#,
                rank_class(index),
                index + 1,
                escape_html(entry.name()),
                format_number(entry.points),
            )
        })
        .collect()
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let limit = dashboard.settings().leaderboard_limit;
    let response: LeaderboardResponse =
        fetch(dashboard.backend(), Endpoint::Leaderboard { limit }).await?;

    let html = render_leaderboard(&response.leaderboard);
    dashboard.document().write().await.set_html(ids::LEADERBOARD, html);

    Ok(())
}

pub fn show_error(doc: &mut Document) {
    doc.set_html(ids::LEADERBOARD, placeholder_row(COLUMNS, "Error loading data"));
}
