//! Birthdays: upcoming list and twelve-month calendar

use super::placeholder;
use crate::backend::schema::{BirthdayEntry, BirthdaysResponse};
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::{escape_html, month_full, month_short};

/// Label for the number of days until a birthday
pub fn days_until_text(days: i64) -> String {
    match days {
        0 => "Today!".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("{} days", n),
    }
}

/// Upcoming birthdays list
pub fn render_upcoming(birthdays: &[BirthdayEntry]) -> String {
    if birthdays.is_empty() {
        return placeholder("No upcoming birthdays");
    }

    birthdays
        .iter()
        .map(|b| {
            let days = b
                .days_until
                .map(|d| format!(r#"<div class="days-until">{}</div>"#, days_until_text(d)))
                .unwrap_or_default();

            format!(
                r#"<div class="birthday-item"><div class="birthday-user"><div class="birthday-icon">🎂</div><div><div class="birthday-details">{}</div><div class="birthday-date">{} {}</div></div></div>{}</div>"#,
                escape_html(b.name()),
                month_short(b.month).unwrap_or("?"),
                b.day,
                days,
            )
        })
        .collect()
}

/// Birthdays grouped into twelve month buckets, index 0 = January.
///
/// Entries with a month outside 1-12 are dropped.
pub fn group_by_month(birthdays: &[BirthdayEntry]) -> [Vec<&BirthdayEntry>; 12] {
    let mut buckets: [Vec<&BirthdayEntry>; 12] = Default::default();

    for birthday in birthdays {
        match birthday.month {
            1..=12 => buckets[birthday.month as usize - 1].push(birthday),
            month => {
                tracing::warn!(
                    username = %birthday.username,
                    month,
                    "Dropping birthday with invalid month"
                );
            }
        }
    }

    buckets
}

/// Calendar grid with every month, empty months included
pub fn render_calendar(birthdays: &[BirthdayEntry]) -> String {
    if birthdays.is_empty() {
        return placeholder("No birthdays registered");
    }

    let mut html = String::from(r#"<div class="calendar-grid">"#);

    for (index, bucket) in group_by_month(birthdays).iter().enumerate() {
        let month = index as u32 + 1;
        let has_any = !bucket.is_empty();

        html.push_str(&format!(
            r#"<div class="calendar-month{}" data-month="{}"><div class="month-header"><i class="fas fa-calendar"></i><span>{}</span>"#,
            if has_any { " has-birthdays" } else { "" },
            month,
            month_full(month).unwrap_or("?"),
        ));
        if has_any {
            html.push_str(&format!(r#"<span class="birthday-count">{}</span>"#, bucket.len()));
        }
        html.push_str(r#"</div><div class="month-birthdays">"#);

        if has_any {
            for birthday in bucket {
                html.push_str(&format!(
                    r#"<div class="calendar-birthday-item"><div class="birthday-day">{}</div><div class="birthday-username">{}</div></div>"#,
                    birthday.day,
                    escape_html(birthday.name()),
                ));
            }
        } else {
            html.push_str(r#"<div class="no-birthdays">No birthdays</div>"#);
        }

        html.push_str("</div></div>");
    }

    html.push_str("</div>");
    html
}

pub async fn load_upcoming(dashboard: &Dashboard) -> FetchResult<()> {
    let response: BirthdaysResponse =
        fetch(dashboard.backend(), Endpoint::UpcomingBirthdays).await?;

    let html = render_upcoming(&response.birthdays);
    dashboard.document().write().await.set_html(ids::BIRTHDAYS, html);

    Ok(())
}

pub async fn load_calendar(dashboard: &Dashboard) -> FetchResult<()> {
    let response: BirthdaysResponse =
        fetch(dashboard.backend(), Endpoint::BirthdayCalendar).await?;

    let html = render_calendar(&response.birthdays);
    dashboard
        .document()
        .write()
        .await
        .set_html(ids::BIRTHDAY_CALENDAR, html);

    Ok(())
}

pub fn show_upcoming_error(doc: &mut Document) {
    doc.set_html(ids::BIRTHDAYS, placeholder("Error loading data"));
}

pub fn show_calendar_error(doc: &mut Document) {
    doc.set_html(ids::BIRTHDAY_CALENDAR, placeholder("Error loading calendar"));
}
