//! Overview counters

use super::STAT_ERROR_TEXT;
use crate::backend::schema::OverviewStats;
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::format_number;

const STAT_IDS: [&str; 7] = [
    ids::STAT_USERS,
    ids::STAT_POINTS,
    ids::STAT_MESSAGES,
    ids::STAT_MESSAGES_24H,
    ids::STAT_REMINDERS,
    ids::STAT_BIRTHDAYS,
    ids::STAT_SPAM,
];

/// Formatted value for each counter region
pub fn render_overview(stats: &OverviewStats) -> [(&'static str, String); 7] {
    [
        (ids::STAT_USERS, format_number(stats.total_users)),
        (ids::STAT_POINTS, format_number(stats.total_points)),
        (ids::STAT_MESSAGES, format_number(stats.total_messages)),
        (ids::STAT_MESSAGES_24H, format_number(stats.messages_24h)),
        (ids::STAT_REMINDERS, format_number(stats.active_reminders)),
        (ids::STAT_BIRTHDAYS, format_number(stats.total_birthdays)),
        (ids::STAT_SPAM, format_number(stats.spam_today)),
    ]
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let stats: OverviewStats = fetch(dashboard.backend(), Endpoint::Overview).await?;

    let mut doc = dashboard.document().write().await;
    for (id, value) in render_overview(&stats) {
        doc.set_text(id, value);
    }

    Ok(())
}

pub fn show_error(doc: &mut Document) {
    for id in STAT_IDS {
        doc.set_text(id, STAT_ERROR_TEXT);
    }
}
