//! Formatting Utilities
//!
//! Pure conversions from raw backend values into display strings:
//! thousands grouping, relative times, calendar labels and clock text.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Abbreviated month names, index 0 = January
pub const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full month names, index 0 = January
pub const MONTHS_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format an integer with `,` thousands separators.
///
/// ```
/// use jule_dashboard::format::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(-1234), "-1,234");
/// ```
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        out.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Relative time against the current wall clock.
///
/// Not frozen: calling twice on the same timestamp can drift.
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    format_relative_time_at(timestamp, Utc::now())
}

/// Relative time against an explicit `now`
pub fn format_relative_time_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - timestamp;
    let minutes = diff.num_minutes();

    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    format!("{}d ago", diff.num_days())
}

/// Abbreviated month name for a 1-based month
pub fn month_short(month: u32) -> Option<&'static str> {
    month_index(month).map(|i| MONTHS_SHORT[i])
}

/// Full month name for a 1-based month
pub fn month_full(month: u32) -> Option<&'static str> {
    month_index(month).map(|i| MONTHS_FULL[i])
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| month as usize - 1)
}

/// Short weekday label, e.g. `Mon`
pub fn format_weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Short month/day label, e.g. `May 3`
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

// Server-rendered times are labelled UTC; the page's own clock shows the
// viewer's local time.

/// Live clock text, e.g. `Oct 16, 2026, 09:05:03 PM UTC`
pub fn format_clock(now: DateTime<Utc>) -> String {
    now.format("%b %-d, %Y, %I:%M:%S %p UTC").to_string()
}

/// Time of day, e.g. `09:05:03 PM UTC`
pub fn format_time_of_day(now: DateTime<Utc>) -> String {
    now.format("%I:%M:%S %p UTC").to_string()
}

/// Reminder due time, e.g. `May 3, 02:30 PM UTC`
pub fn format_reminder_time(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %I:%M %p UTC").to_string()
}

/// Percentage with one decimal place
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Human-friendly duration for uptime displays
pub fn format_uptime(elapsed: Duration) -> String {
    let days = elapsed.num_days();
    let hours = elapsed.num_hours() % 24;
    let minutes = elapsed.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Escape text for insertion into HTML content or attribute values
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 21, 5, 3).unwrap()
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(100000), "100,000");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-5), "-5");
        assert_eq!(format_number(-1234), "-1,234");
        assert_eq!(format_number(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = now();
        assert_eq!(format_relative_time_at(now - Duration::seconds(30), now), "just now");
        assert_eq!(format_relative_time_at(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative_time_at(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative_time_at(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn test_relative_time_boundaries() {
        let now = now();
        assert_eq!(format_relative_time_at(now - Duration::seconds(60), now), "1m ago");
        assert_eq!(format_relative_time_at(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_relative_time_at(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(format_relative_time_at(now - Duration::hours(24), now), "1d ago");
        // Future instants (clock skew) still read as fresh
        assert_eq!(format_relative_time_at(now + Duration::minutes(10), now), "just now");
    }

    #[test]
    fn test_month_tables() {
        assert_eq!(month_short(1), Some("Jan"));
        assert_eq!(month_short(12), Some("Dec"));
        assert_eq!(month_full(5), Some("May"));
        assert_eq!(month_full(9), Some("September"));
        assert_eq!(month_short(0), None);
        assert_eq!(month_full(13), None);
    }

    #[test]
    fn test_date_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(format_weekday(date), "Mon");
        assert_eq!(format_month_day(date), "Oct 12");
    }

    #[test]
    fn test_clock_formats() {
        assert_eq!(format_clock(now()), "Oct 16, 2026, 09:05:03 PM UTC");
        assert_eq!(format_time_of_day(now()), "09:05:03 PM UTC");
        assert_eq!(format_reminder_time(now()), "Oct 16, 09:05 PM UTC");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::minutes(4)), "4m");
        assert_eq!(format_uptime(Duration::minutes(125)), "2h 5m");
        assert_eq!(format_uptime(Duration::hours(50)), "2d 2h");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
