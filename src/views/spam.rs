//! Spam detection log table

use chrono::{DateTime, Utc};

use super::placeholder_row;
use crate::backend::schema::{SpamLogEntry, SpamLogsResponse};
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::{escape_html, format_relative_time_at};

const COLUMNS: usize = 6;

/// Badge style for a moderation action
pub fn action_class(action: &str) -> &'static str {
    if action.to_lowercase().contains("delete") {
        "danger"
    } else {
        "warning"
    }
}

/// Table rows for spam logs, relative times measured against `now`
pub fn render_spam_logs(logs: &[SpamLogEntry], hours: u32, now: DateTime<Utc>) -> String {
    if logs.is_empty() {
        return placeholder_row(
            COLUMNS,
            &format!("No spam logs in the last {} hours", hours),
        );
    }

    logs.iter()
        .map(|log| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td><td>{:.1}s</td><td><span class="badge {}">{}</span></td></tr>"#,
                format_relative_time_at(log.detected_at, now),
                escape_html(&log.username),
                log.guild_id,
                log.message_count,
                log.timeframe,
                action_class(&log.action),
                escape_html(&log.action),
            )
        })
        .collect()
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let settings = dashboard.settings();
    let endpoint = Endpoint::SpamLogs {
        limit: settings.spam_limit,
        hours: settings.spam_hours,
    };
    let response: SpamLogsResponse = fetch(dashboard.backend(), endpoint).await?;

    let html = render_spam_logs(&response.logs, settings.spam_hours, Utc::now());
    dashboard.document().write().await.set_html(ids::SPAM_LOGS, html);

    Ok(())
}

pub fn show_error(doc: &mut Document) {
    doc.set_html(ids::SPAM_LOGS, placeholder_row(COLUMNS, "Error loading logs"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn log(action: &str, minutes_ago: i64, timeframe: f64) -> SpamLogEntry {
        SpamLogEntry {
            detected_at: now() - Duration::minutes(minutes_ago),
            username: "spammer".to_string(),
            guild_id: 123456789012345678,
            message_count: 8,
            timeframe,
            action: action.to_string(),
        }
    }

    #[test]
    fn test_action_class_is_case_insensitive() {
        assert_eq!(action_class("delete"), "danger");
        assert_eq!(action_class("Message DELETED"), "danger");
        assert_eq!(action_class("warn"), "warning");
        assert_eq!(action_class("timeout"), "warning");
        assert_eq!(action_class(""), "warning");
    }

    #[test]
    fn test_row_contents() {
        let html = render_spam_logs(&[log("delete", 5, 4.26)], 24, now());

        assert!(html.contains("5m ago"));
        assert!(html.contains("<code>123456789012345678</code>"));
        assert!(html.contains("<td>8</td>"));
        assert!(html.contains("<td>4.3s</td>"));
        assert!(html.contains(r#"<span class="badge danger">delete</span>"#));
    }

    #[test]
    fn test_timeframe_one_decimal() {
        let html = render_spam_logs(&[log("warn", 0, 10.0)], 24, now());

        assert!(html.contains("<td>10.0s</td>"));
        assert!(html.contains("just now"));
    }

    #[test]
    fn test_empty_mentions_window() {
        let html = render_spam_logs(&[], 6, now());

        assert!(html.contains("No spam logs in the last 6 hours"));
        assert!(html.contains(r#"colspan="6""#));
    }
}
