//! Game totals, global win rate and the per-game chart

use super::STAT_ERROR_TEXT;
use crate::backend::schema::{GameStat, GamesResponse};
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::charts::update_games_chart;
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::{format_number, format_percent};

/// Class marking a chart canvas whose last load failed
pub const CHART_ERROR_CLASS: &str = "chart-error";

/// Wins over plays across every game type, one decimal.
///
/// `0%` when nothing has been played.
pub fn format_win_rate(games: &[GameStat]) -> String {
    let played: i64 = games.iter().map(|g| g.total_played).sum();
    let wins: i64 = games.iter().map(|g| g.total_wins).sum();

    if played <= 0 {
        return "0%".to_string();
    }

    format_percent(wins as f64 / played as f64 * 100.0)
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let response: GamesResponse = fetch(dashboard.backend(), Endpoint::Games).await?;

    let mut charts = dashboard.charts().lock().await;
    let mut doc = dashboard.document().write().await;

    doc.set_text(ids::GAME_TOTAL, format_number(response.total_games));
    doc.set_text(ids::GAME_WINRATE, format_win_rate(&response.games));
    update_games_chart(&mut charts.games, &mut *doc, &response.games);
    doc.remove_class(ids::GAMES_CHART, CHART_ERROR_CLASS);

    Ok(())
}

/// Counters show the error marker; the chart keeps its last data
pub fn show_error(doc: &mut Document) {
    doc.set_text(ids::GAME_TOTAL, STAT_ERROR_TEXT);
    doc.set_text(ids::GAME_WINRATE, STAT_ERROR_TEXT);
    doc.add_class(ids::GAMES_CHART, CHART_ERROR_CLASS);
}
