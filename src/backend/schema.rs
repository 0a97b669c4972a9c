//! Backend Response Schemas
//!
//! Typed shapes of every endpoint the dashboard consumes. Required
//! fields fail deserialization when missing; fields the backend may
//! omit are `Option` or defaulted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// Overview
// ============================================

/// `GET /api/stats/overview`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OverviewStats {
    pub total_users: i64,
    pub total_points: i64,
    pub total_messages: i64,
    pub messages_24h: i64,
    pub active_reminders: i64,
    pub total_birthdays: i64,
    pub spam_today: i64,
}

// ============================================
// Users
// ============================================

/// `GET /api/users/leaderboard`
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub user_id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub points: i64,
}

impl LeaderboardEntry {
    pub fn name(&self) -> &str {
        display_name_or(&self.display_name, &self.username)
    }
}

// ============================================
// Birthdays
// ============================================

/// `GET /api/birthdays/upcoming` and `GET /api/birthdays/calendar`
#[derive(Debug, Clone, Deserialize)]
pub struct BirthdaysResponse {
    pub birthdays: Vec<BirthdayEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BirthdayEntry {
    #[serde(default)]
    pub user_id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub month: u32,
    pub day: u32,
    /// Only present on the upcoming endpoint
    #[serde(default)]
    pub days_until: Option<i64>,
}

impl BirthdayEntry {
    pub fn name(&self) -> &str {
        display_name_or(&self.display_name, &self.username)
    }
}

// ============================================
// Spam logs
// ============================================

/// `GET /api/logs/spam`
#[derive(Debug, Clone, Deserialize)]
pub struct SpamLogsResponse {
    pub logs: Vec<SpamLogEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpamLogEntry {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub detected_at: DateTime<Utc>,
    pub username: String,
    pub guild_id: u64,
    pub message_count: u32,
    /// Detection window in seconds
    pub timeframe: f64,
    pub action: String,
}

// ============================================
// Reminders
// ============================================

/// `GET /api/reminders`
#[derive(Debug, Clone, Deserialize)]
pub struct RemindersResponse {
    pub reminders: Vec<ReminderEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReminderEntry {
    pub message: String,
    pub username: String,
    pub channel_id: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub remind_time: DateTime<Utc>,
}

// ============================================
// Activity
// ============================================

/// `GET /api/activity/chart`
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityResponse {
    pub activity: Vec<ActivityPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub count: i64,
}

// ============================================
// Games
// ============================================

/// `GET /api/games/stats`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GamesResponse {
    pub total_games: i64,
    pub games: Vec<GameStat>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameStat {
    pub game_type: String,
    pub total_played: i64,
    pub total_wins: i64,
    #[serde(default)]
    pub total_losses: Option<i64>,
    #[serde(default)]
    pub best_streak: Option<i64>,
}

/// `GET /api/trivia/stats`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriviaStats {
    /// Percentage, 0-100
    pub accuracy: f64,
    #[serde(default)]
    pub total_questions: Option<i64>,
    #[serde(default)]
    pub correct_answers: Option<i64>,
}

// ============================================
// Music
// ============================================

/// `GET /api/music/top`
#[derive(Debug, Clone, Deserialize)]
pub struct TopSongsResponse {
    #[serde(default)]
    pub total_songs: Option<i64>,
    pub top_songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub plays: i64,
}

// ============================================
// Helpers
// ============================================

/// Display name with username fallback; an empty display name counts as absent
fn display_name_or<'a>(display_name: &'a Option<String>, username: &'a str) -> &'a str {
    match display_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => username,
    }
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}
