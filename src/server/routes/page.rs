//! Page Route
//!
//! - GET /?tab={tab} - The full dashboard page
//!
//! The page is laid out here and filled from the document: every region a
//! renderer writes is emitted with its current classes, style, attributes
//! and content. The active tab comes from the query, applied to a copy of
//! the document, so each viewer keeps their own.
//!
//! After load the page keeps itself current: the clock ticks in the
//! browser, regions are polled from `/regions` on the refresh interval,
//! and charts are mounted once and then updated in place from
//! `/charts/:canvas` whenever their revision moves.

use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use crate::document::{ids, Document, Element};
use crate::format::escape_html;
use crate::nav::{self, TABS};
use crate::server::dto::{page_location, PageQuery};
use crate::server::error::ServerResult;
use crate::server::state::AppState;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";
const FONT_AWESOME_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Client side of the live page. Reads its poll period from
/// `data-poll-ms` on `<body>`.
const LIVE_SCRIPT: &str = r#"<script>
(function () {
  var pollMs = Number(document.body.getAttribute('data-poll-ms')) || 30000;
  var charts = {};
  var perViewer = { 'page-title': true, 'current-time': true };

  function mount(canvas, config, revision) {
    charts[canvas.id] = { chart: new Chart(canvas, config), revision: String(revision) };
  }

  document.querySelectorAll('canvas[data-chart]').forEach(function (canvas) {
    mount(canvas, JSON.parse(canvas.getAttribute('data-chart')),
      canvas.getAttribute('data-chart-revision'));
  });

  function syncChart(canvas, revision) {
    var entry = charts[canvas.id];
    if (revision === undefined || (entry && entry.revision === String(revision))) return;
    fetch('/charts/' + encodeURIComponent(canvas.id))
      .then(function (r) { return r.ok ? r.json() : null; })
      .then(function (body) {
        if (!body) return;
        var current = charts[canvas.id];
        if (!current) { mount(canvas, body.config, body.revision); return; }
        current.chart.data.labels = body.config.data.labels;
        current.chart.data.datasets[0].data = body.config.data.datasets[0].data;
        current.chart.update();
        current.revision = String(body.revision);
      })
      .catch(function () {});
  }

  function apply(el) {
    if (perViewer[el.id]) return;
    if (el.classes.indexOf('nav-item') >= 0 || el.classes.indexOf('view-section') >= 0) return;
    var node = document.getElementById(el.id);
    if (!node) return;
    node.className = el.classes.join(' ');
    if (el.style) node.setAttribute('style', el.style); else node.removeAttribute('style');
    if (el.content.kind === 'text') node.textContent = el.content.value;
    if (el.content.kind === 'html') node.innerHTML = el.content.value;
    if (el.tag === 'canvas') syncChart(node, (el.attributes || {})['data-chart-revision']);
  }

  function poll() {
    fetch('/regions')
      .then(function (r) { return r.ok ? r.json() : null; })
      .then(function (doc) {
        if (!doc) return;
        Object.keys(doc.elements).forEach(function (id) { apply(doc.elements[id]); });
      })
      .catch(function () {});
  }

  function tick() {
    var clock = document.getElementById('current-time');
    if (!clock) return;
    clock.textContent = new Date().toLocaleString('en-US', {
      month: 'short', day: 'numeric', year: 'numeric',
      hour: '2-digit', minute: '2-digit', second: '2-digit'
    });
  }

  tick();
  setInterval(tick, 1000);
  setInterval(poll, pollMs);
})();
</script>"#;

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ServerResult<Html<String>> {
    let poll_secs = state.orchestrator.config().interval.as_secs();
    let mut doc = state.dashboard().snapshot().await;
    if let Some(tab) = &query.tab {
        nav::activate(&mut doc, tab)?;
    }
    Ok(Html(render_page(&doc, poll_secs)))
}

/// Emit a region, or nothing when the document lacks it
fn region(doc: &Document, id: &str) -> String {
    doc.get(id).map(Element::outer_html).unwrap_or_default()
}

/// Emit a container region around fixed children
fn wrap(doc: &Document, id: &str, children: &str) -> String {
    match doc.get(id) {
        Some(el) => format!("{}{}</{}>", el.open_tag(), children, el.tag),
        None => String::new(),
    }
}

fn stat_card(doc: &Document, id: &str, icon: &str, label: &str) -> String {
    format!(
        r#"<div class="stat-card"><div class="stat-icon"><i class="fas {}"></i></div><div class="stat-info">{}<div class="stat-label">{}</div></div></div>"#,
        icon,
        region(doc, id),
        label
    )
}

fn card(title: &str, icon: &str, body: &str) -> String {
    format!(
        r#"<div class="card"><div class="card-header"><h3><i class="fas {}"></i> {}</h3></div><div class="card-body">{}</div></div>"#,
        icon, title, body
    )
}

fn table(headers: &[&str], body: String) -> String {
    let head: String = headers.iter().map(|h| format!("<th>{}</th>", h)).collect();
    format!(r#"<table class="data-table"><thead><tr>{}</tr></thead>{}</table>"#, head, body)
}

fn sidebar(doc: &Document) -> String {
    let items: String = TABS
        .iter()
        .map(|(tab, label)| {
            let link = format!(
                r#"<a class="nav-link" href="{}">{}</a>"#,
                escape_html(&page_location(Some(*tab))),
                escape_html(label)
            );
            wrap(doc, &format!("nav-{}", tab), &link)
        })
        .collect();

    format!(
        r#"<aside class="sidebar"><div class="logo"><i class="fas fa-robot"></i> Jule</div><ul class="nav-list">{}</ul></aside>"#,
        items
    )
}

fn header(doc: &Document) -> String {
    let refresh_action = match nav::active_tab(doc) {
        Some(tab) => format!("/refresh?tab={}", urlencoding::encode(&tab)),
        None => "/refresh".to_string(),
    };

    format!(
        r#"<header class="top-bar">{}<div class="top-bar-meta"><span class="clock">{}</span><span class="last-updated">Last updated: {}</span><form method="post" action="{}"><button type="submit" class="refresh-btn">{}</button></form></div></header>"#,
        region(doc, ids::PAGE_TITLE),
        region(doc, ids::CURRENT_TIME),
        region(doc, ids::LAST_UPDATED),
        escape_html(&refresh_action),
        region(doc, ids::REFRESH_ICON),
    )
}

fn overview_section(doc: &Document) -> String {
    let stats = [
        (ids::STAT_USERS, "fa-users", "Total Users"),
        (ids::STAT_POINTS, "fa-star", "Total Points"),
        (ids::STAT_MESSAGES, "fa-comments", "Total Messages"),
        (ids::STAT_MESSAGES_24H, "fa-clock", "Messages (24h)"),
        (ids::STAT_REMINDERS, "fa-bell", "Active Reminders"),
        (ids::STAT_BIRTHDAYS, "fa-birthday-cake", "Birthdays"),
        (ids::STAT_SPAM, "fa-shield-alt", "Spam Today"),
        (ids::STAT_UPTIME, "fa-server", "Uptime"),
    ];
    let cards: String = stats
        .iter()
        .map(|(id, icon, label)| stat_card(doc, id, icon, label))
        .collect();

    let body = format!(
        r#"<div class="stats-grid">{}</div><div class="content-grid">{}{}{}</div>"#,
        cards,
        card(
            "Message Activity",
            "fa-chart-line",
            &format!(r#"<div class="chart-container">{}</div>"#, region(doc, ids::ACTIVITY_CHART))
        ),
        card("Upcoming Birthdays", "fa-birthday-cake", &region(doc, ids::BIRTHDAYS)),
        card("Active Reminders", "fa-bell", &region(doc, ids::REMINDERS)),
    );

    wrap(doc, "overview", &body)
}

fn leaderboard_section(doc: &Document) -> String {
    let body = card(
        "Top Users",
        "fa-trophy",
        &table(&["Rank", "User", "Points"], region(doc, ids::LEADERBOARD)),
    );
    wrap(doc, "leaderboard", &body)
}

fn games_section(doc: &Document) -> String {
    let body = format!(
        r#"<div class="stats-grid">{}{}</div><div class="content-grid">{}{}</div>"#,
        stat_card(doc, ids::GAME_TOTAL, "fa-gamepad", "Games Played"),
        stat_card(doc, ids::GAME_WINRATE, "fa-percentage", "Win Rate"),
        card(
            "Games Breakdown",
            "fa-chart-pie",
            &format!(r#"<div class="chart-container">{}</div>"#, region(doc, ids::GAMES_CHART))
        ),
        card(
            "Trivia Accuracy",
            "fa-brain",
            &wrap(doc, ids::TRIVIA_CIRCLE, &region(doc, ids::TRIVIA_VALUE))
        ),
    );
    wrap(doc, "games", &body)
}

fn music_section(doc: &Document) -> String {
    wrap(doc, "music", &card("Top Songs", "fa-music", &region(doc, ids::MUSIC)))
}

fn logs_section(doc: &Document) -> String {
    let body = card(
        "Spam Detection",
        "fa-shield-alt",
        &table(
            &["Time", "User", "Guild", "Messages", "Timeframe", "Action"],
            region(doc, ids::SPAM_LOGS),
        ),
    );
    wrap(doc, "logs", &body)
}

fn birthdays_section(doc: &Document) -> String {
    wrap(
        doc,
        "birthdays",
        &card("Birthday Calendar", "fa-calendar-alt", &region(doc, ids::BIRTHDAY_CALENDAR)),
    )
}

/// The full page for the current document
pub fn render_page(doc: &Document, poll_secs: u64) -> String {
    let title = doc
        .get(ids::PAGE_TITLE)
        .map(|el| el.text_content().to_string())
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Jule</title>
<link rel="stylesheet" href="{fa}">
<script src="{chartjs}"></script>
</head>
<body data-poll-ms="{poll_ms}">
<div class="app">
{sidebar}
<main class="main-content">
{header}
{overview}
{leaderboard}
{games}
{music}
{logs}
{birthdays}
</main>
</div>
{script}
</body>
</html>
"#,
        poll_ms = poll_secs.max(1) * 1000,
        title = escape_html(&title),
        fa = FONT_AWESOME_URL,
        chartjs = CHART_JS_URL,
        sidebar = sidebar(doc),
        header = header(doc),
        overview = overview_section(doc),
        leaderboard = leaderboard_section(doc),
        games = games_section(doc),
        music = music_section(doc),
        logs = logs_section(doc),
        birthdays = birthdays_section(doc),
        script = LIVE_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_contains_every_region() {
        let html = render_page(&Document::dashboard(), 30);

        for id in [
            ids::STAT_USERS,
            ids::LEADERBOARD,
            ids::SPAM_LOGS,
            ids::BIRTHDAY_CALENDAR,
            ids::MUSIC,
            ids::ACTIVITY_CHART,
            ids::GAMES_CHART,
            ids::TRIVIA_VALUE,
            ids::REFRESH_ICON,
            ids::STAT_UPTIME,
        ] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing {}", id);
        }
        assert!(html.contains(r#"<body data-poll-ms="30000">"#));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_page_reflects_active_tab() {
        let mut doc = Document::dashboard();
        nav::activate(&mut doc, "music").unwrap();

        let html = render_page(&doc, 30);

        assert!(html.contains(r#"<section id="music" class="active view-section">"#));
        assert!(html.contains(r#"<section id="overview" class="view-section">"#));
        assert!(html.contains("<title>Music Hall - Jule</title>"));
        assert!(html.contains(r#"action="/refresh?tab=music""#));
    }

    #[test]
    fn test_nav_entries_link_to_their_tab() {
        let html = render_page(&Document::dashboard(), 30);

        for (tab, _) in TABS {
            assert!(html.contains(&format!(r#"href="/?tab={}""#, tab)), "missing link to {}", tab);
        }
        assert!(!html.contains(r#"action="/nav/"#));
    }

    #[test]
    fn test_charts_update_in_place_on_revision_change() {
        let html = render_page(&Document::dashboard(), 30);

        assert!(html.contains("chart.data.labels = body.config.data.labels"));
        assert!(html.contains("chart.update()"));
        assert_eq!(html.matches("new Chart(").count(), 1);
    }

    #[test]
    fn test_missing_region_is_skipped() {
        let mut doc = Document::dashboard();
        doc.remove(ids::GAMES_CHART);

        let html = render_page(&doc, 30);

        assert!(!html.contains(r#"id="gamesChart""#));
    }
}
