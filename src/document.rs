//! Document Model
//!
//! In-process model of the dashboard markup. Renderers write into
//! elements addressed by id; the HTTP layer reads the document back out
//! to assemble pages and snapshots.
//!
//! Writes to an id that is not part of the document are ignored, the
//! same way a view skips a region missing from the page.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::format::escape_html;

/// Well-known element ids
pub mod ids {
    pub const PAGE_TITLE: &str = "page-title";
    pub const REFRESH_ICON: &str = "refresh-icon";
    pub const CURRENT_TIME: &str = "current-time";
    pub const LAST_UPDATED: &str = "last-updated";

    pub const STAT_USERS: &str = "stat-users";
    pub const STAT_POINTS: &str = "stat-points";
    pub const STAT_MESSAGES: &str = "stat-messages";
    pub const STAT_MESSAGES_24H: &str = "stat-messages-24h";
    pub const STAT_REMINDERS: &str = "stat-reminders";
    pub const STAT_BIRTHDAYS: &str = "stat-birthdays";
    pub const STAT_SPAM: &str = "stat-spam";
    pub const STAT_UPTIME: &str = "stat-uptime";

    pub const LEADERBOARD: &str = "leaderboard-body";
    pub const BIRTHDAYS: &str = "birthdays-list";
    pub const BIRTHDAY_CALENDAR: &str = "birthday-calendar";
    pub const SPAM_LOGS: &str = "logs-body";
    pub const REMINDERS: &str = "reminders-list";
    pub const GAME_TOTAL: &str = "game-total";
    pub const GAME_WINRATE: &str = "game-winrate";
    pub const TRIVIA_CIRCLE: &str = "trivia-accuracy-circle";
    pub const TRIVIA_VALUE: &str = "trivia-accuracy-value";
    pub const MUSIC: &str = "music-list";

    pub const ACTIVITY_CHART: &str = "activityChart";
    pub const GAMES_CHART: &str = "gamesChart";
}

/// Class marking the active nav entry and visible section
pub const ACTIVE_CLASS: &str = "active";
/// Class carried by every navigation entry
pub const NAV_ITEM_CLASS: &str = "nav-item";
/// Class carried by every switchable view section
pub const VIEW_SECTION_CLASS: &str = "view-section";
/// Attribute naming the tab a nav entry activates
pub const TAB_ATTRIBUTE: &str = "data-tab";

const LOADING_HTML: &str = r#"<div class="loading">Loading...</div>"#;

fn loading_row(columns: usize) -> String {
    format!(r#"<tr><td colspan="{}" class="loading">Loading...</td></tr>"#, columns)
}

/// Content of an element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Content {
    Empty,
    /// Plain text, escaped on output
    Text(String),
    /// Pre-built markup, inserted as-is
    Html(String),
}

/// One addressable element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            classes: BTreeSet::new(),
            content: Content::Empty,
            style: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.content = Content::Html(html.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Inner markup of this element
    pub fn inner_html(&self) -> String {
        match &self.content {
            Content::Empty => String::new(),
            Content::Text(text) => escape_html(text),
            Content::Html(html) => html.clone(),
        }
    }

    /// Text content, or the raw markup for HTML content
    pub fn text_content(&self) -> &str {
        match &self.content {
            Content::Empty => "",
            Content::Text(text) | Content::Html(text) => text,
        }
    }

    /// Full markup of the element including its own tag
    pub fn outer_html(&self) -> String {
        format!("{}{}</{}>", self.open_tag(), self.inner_html(), self.tag)
    }

    /// Opening tag with id, classes, style and attributes
    pub fn open_tag(&self) -> String {
        let mut open = format!("<{} id=\"{}\"", self.tag, escape_html(&self.id));

        if !self.classes.is_empty() {
            let classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();
            open.push_str(&format!(" class=\"{}\"", escape_html(&classes.join(" "))));
        }
        if let Some(style) = &self.style {
            open.push_str(&format!(" style=\"{}\"", escape_html(style)));
        }
        for (name, value) in &self.attributes {
            open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
        }

        open.push('>');
        open
    }
}

/// The dashboard document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    #[serde(skip)]
    last_chart_id: u64,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the document in its initial dashboard layout.
    ///
    /// The overview tab and section start out active.
    pub fn dashboard() -> Self {
        let mut doc = Self::new();

        doc.insert(Element::new(ids::PAGE_TITLE, "h1").text("Dashboard Overview"));
        doc.insert(Element::new(ids::REFRESH_ICON, "i").class("fas").class("fa-sync-alt"));
        doc.insert(Element::new(ids::CURRENT_TIME, "span"));
        doc.insert(Element::new(ids::LAST_UPDATED, "span").text("never"));

        for (tab, label) in crate::nav::TABS {
            let mut item = Element::new(format!("nav-{}", tab), "li")
                .class(NAV_ITEM_CLASS)
                .attr(TAB_ATTRIBUTE, *tab)
                .text(*label);
            let mut section = Element::new(*tab, "section").class(VIEW_SECTION_CLASS);
            if *tab == crate::nav::DEFAULT_TAB {
                item = item.class(ACTIVE_CLASS);
                section = section.class(ACTIVE_CLASS);
            }
            doc.insert(item);
            doc.insert(section);
        }

        for id in [
            ids::STAT_USERS,
            ids::STAT_POINTS,
            ids::STAT_MESSAGES,
            ids::STAT_MESSAGES_24H,
            ids::STAT_REMINDERS,
            ids::STAT_BIRTHDAYS,
            ids::STAT_SPAM,
            ids::STAT_UPTIME,
            ids::GAME_TOTAL,
            ids::GAME_WINRATE,
        ] {
            doc.insert(Element::new(id, "div").class("stat-value").text("-"));
        }

        for (id, columns) in [(ids::LEADERBOARD, 3), (ids::SPAM_LOGS, 6)] {
            doc.insert(Element::new(id, "tbody").html(loading_row(columns)));
        }
        for id in [
            ids::BIRTHDAYS,
            ids::BIRTHDAY_CALENDAR,
            ids::REMINDERS,
            ids::MUSIC,
        ] {
            doc.insert(Element::new(id, "div").html(LOADING_HTML));
        }

        doc.insert(Element::new(ids::TRIVIA_CIRCLE, "div").class("progress-circle"));
        doc.insert(
            Element::new(ids::TRIVIA_VALUE, "span")
                .class("progress-value")
                .text("0%"),
        );

        for id in [ids::ACTIVITY_CHART, ids::GAMES_CHART] {
            doc.insert(Element::new(id, "canvas"));
        }

        doc
    }

    /// Add or replace an element
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    /// Remove an element, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in id order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Replace an element's content with plain text
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        self.update(id, |el| el.content = Content::Text(text.into()))
    }

    /// Replace an element's content with markup
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) -> bool {
        self.update(id, |el| el.content = Content::Html(html.into()))
    }

    /// Replace an element's inline style
    pub fn set_style(&mut self, id: &str, style: impl Into<String>) -> bool {
        self.update(id, |el| el.style = Some(style.into()))
    }

    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.update(id, |el| {
            el.classes.insert(class.to_string());
        })
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.update(id, |el| {
            el.classes.remove(class);
        })
    }

    pub fn set_attribute(&mut self, id: &str, name: &str, value: impl Into<String>) -> bool {
        self.update(id, |el| {
            el.attributes.insert(name.to_string(), value.into());
        })
    }

    /// Whether the element exists and carries `class`
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).map(|el| el.has_class(class)).unwrap_or(false)
    }

    /// Ids of every element carrying `class`
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .values()
            .filter(|el| el.has_class(class))
            .map(|el| el.id.clone())
            .collect()
    }

    /// Inner markup of an element, empty when absent
    pub fn inner_html(&self, id: &str) -> String {
        self.get(id).map(Element::inner_html).unwrap_or_default()
    }

    /// Allocate an id for a newly mounted chart
    pub(crate) fn next_chart_id(&mut self) -> u64 {
        self.last_chart_id += 1;
        self.last_chart_id
    }

    fn update(&mut self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        match self.elements.get_mut(id) {
            Some(el) => {
                f(el);
                true
            }
            None => {
                tracing::debug!(id = %id, "Skipping write to missing element");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_layout_has_regions() {
        let doc = Document::dashboard();

        for id in [
            ids::PAGE_TITLE,
            ids::REFRESH_ICON,
            ids::LEADERBOARD,
            ids::BIRTHDAY_CALENDAR,
            ids::SPAM_LOGS,
            ids::ACTIVITY_CHART,
            ids::GAMES_CHART,
            ids::TRIVIA_CIRCLE,
            ids::STAT_UPTIME,
        ] {
            assert!(doc.contains(id), "missing {}", id);
        }
    }

    #[test]
    fn test_loading_rows_span_their_table() {
        let doc = Document::dashboard();

        assert!(doc.inner_html(ids::LEADERBOARD).contains(r#"colspan="3""#));
        assert!(doc.inner_html(ids::SPAM_LOGS).contains(r#"colspan="6""#));
    }

    #[test]
    fn test_dashboard_layout_marks_overview_active() {
        let doc = Document::dashboard();

        assert!(doc.has_class("nav-overview", ACTIVE_CLASS));
        assert!(doc.has_class("overview", ACTIVE_CLASS));
        assert_eq!(doc.ids_with_class(ACTIVE_CLASS).len(), 2);
    }

    #[test]
    fn test_writes_to_missing_element_are_ignored() {
        let mut doc = Document::new();
        assert!(!doc.set_text("nope", "x"));
        assert!(!doc.add_class("nope", "active"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_text_is_escaped_html_is_not() {
        let mut doc = Document::new();
        doc.insert(Element::new("a", "div"));
        doc.insert(Element::new("b", "div"));

        doc.set_text("a", "<b>bold</b>");
        doc.set_html("b", "<b>bold</b>");

        assert_eq!(doc.inner_html("a"), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(doc.inner_html("b"), "<b>bold</b>");
    }

    #[test]
    fn test_outer_html() {
        let el = Element::new("x", "span")
            .class("stat")
            .class("big")
            .attr("data-tab", "games")
            .text("1,000");

        assert_eq!(
            el.outer_html(),
            r#"<span id="x" class="big stat" data-tab="games">1,000</span>"#
        );
    }
}
