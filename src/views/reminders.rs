//! Active reminders list

use super::placeholder;
use crate::backend::schema::{ReminderEntry, RemindersResponse};
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::{escape_html, format_reminder_time};

pub fn render_reminders(reminders: &[ReminderEntry]) -> String {
    if reminders.is_empty() {
        return placeholder("No active reminders");
    }

    reminders
        .iter()
        .map(|r| {
            format!(
                r#"<div class="reminder-item"><div class="reminder-info"><div class="reminder-message">{}</div><div class="reminder-meta">User: {} | Channel: {}</div></div><div class="reminder-time">{}</div></div>"#,
                escape_html(&r.message),
                escape_html(&r.username),
                r.channel_id,
                format_reminder_time(r.remind_time),
            )
        })
        .collect()
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let response: RemindersResponse = fetch(dashboard.backend(), Endpoint::Reminders).await?;

    let html = render_reminders(&response.reminders);
    dashboard.document().write().await.set_html(ids::REMINDERS, html);

    Ok(())
}

pub fn show_error(doc: &mut Document) {
    doc.set_html(ids::REMINDERS, placeholder("Error loading data"));
}
