//! Navigation Controller
//!
//! Switches the visible view section and the page title. Each tab has a
//! nav entry (`nav-{tab}`) and a view section whose id is the tab id.

use crate::document::{
    ids, Document, ACTIVE_CLASS, NAV_ITEM_CLASS, TAB_ATTRIBUTE, VIEW_SECTION_CLASS,
};

/// Tab ids with their menu labels, in menu order
pub const TABS: &[(&str, &str)] = &[
    ("overview", "Overview"),
    ("leaderboard", "Leaderboard"),
    ("games", "Games"),
    ("music", "Music"),
    ("logs", "Logs"),
    ("birthdays", "Birthdays"),
];

/// Tab marked active in the initial layout
pub const DEFAULT_TAB: &str = "overview";

/// Page title for tabs without their own
pub const FALLBACK_TITLE: &str = "Dashboard";

/// Navigation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavError {
    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// Page title for a tab id
pub fn title_for(tab: &str) -> &'static str {
    match tab {
        "overview" => "Dashboard Overview",
        "leaderboard" => "Global Rankings",
        "games" => "Games Arena",
        "music" => "Music Hall",
        "logs" => "Security Logs",
        _ => FALLBACK_TITLE,
    }
}

fn nav_id(tab: &str) -> String {
    format!("nav-{}", tab)
}

/// Activate a tab: one active nav entry, one active section, new title.
///
/// Returns the title that was set.
pub fn activate(doc: &mut Document, tab: &str) -> Result<&'static str, NavError> {
    let nav_entry = nav_id(tab);
    let has_entry = doc
        .get(&nav_entry)
        .map(|el| el.has_class(NAV_ITEM_CLASS))
        .unwrap_or(false);
    if !has_entry {
        return Err(NavError::UnknownTab(tab.to_string()));
    }

    for id in doc.ids_with_class(NAV_ITEM_CLASS) {
        doc.remove_class(&id, ACTIVE_CLASS);
    }
    doc.add_class(&nav_entry, ACTIVE_CLASS);

    for id in doc.ids_with_class(VIEW_SECTION_CLASS) {
        doc.remove_class(&id, ACTIVE_CLASS);
    }
    if !doc.add_class(tab, ACTIVE_CLASS) {
        tracing::warn!(tab = %tab, "No view section for tab");
    }

    let title = title_for(tab);
    doc.set_text(ids::PAGE_TITLE, title);

    tracing::debug!(tab = %tab, title, "Activated tab");
    Ok(title)
}

/// The tab whose nav entry is currently active
pub fn active_tab(doc: &Document) -> Option<String> {
    doc.elements()
        .find(|el| el.has_class(NAV_ITEM_CLASS) && el.has_class(ACTIVE_CLASS))
        .and_then(|el| el.attributes.get(TAB_ATTRIBUTE).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(doc: &Document, class: &str) -> usize {
        doc.ids_with_class(class)
            .iter()
            .filter(|id| doc.has_class(id, ACTIVE_CLASS))
            .count()
    }

    #[test]
    fn test_initial_layout_is_untouched() {
        let doc = Document::dashboard();

        assert_eq!(active_tab(&doc).as_deref(), Some(DEFAULT_TAB));
        assert!(doc.has_class(DEFAULT_TAB, ACTIVE_CLASS));
    }

    #[test]
    fn test_activate_leaves_exactly_one_active() {
        let mut doc = Document::dashboard();

        for (tab, _) in TABS {
            activate(&mut doc, tab).unwrap();

            assert_eq!(active_count(&doc, NAV_ITEM_CLASS), 1);
            assert_eq!(active_count(&doc, VIEW_SECTION_CLASS), 1);
            assert!(doc.has_class(tab, ACTIVE_CLASS));
            assert_eq!(active_tab(&doc).as_deref(), Some(*tab));
        }
    }

    #[test]
    fn test_titles() {
        let mut doc = Document::dashboard();

        assert_eq!(activate(&mut doc, "games").unwrap(), "Games Arena");
        assert_eq!(doc.get(ids::PAGE_TITLE).unwrap().text_content(), "Games Arena");

        // No dedicated title: generic label
        assert_eq!(activate(&mut doc, "birthdays").unwrap(), FALLBACK_TITLE);
        assert_eq!(title_for("settings"), FALLBACK_TITLE);
    }

    #[test]
    fn test_unknown_tab_changes_nothing() {
        let mut doc = Document::dashboard();

        let err = activate(&mut doc, "settings").unwrap_err();

        assert_eq!(err, NavError::UnknownTab("settings".to_string()));
        assert_eq!(active_tab(&doc).as_deref(), Some(DEFAULT_TAB));
    }
}
