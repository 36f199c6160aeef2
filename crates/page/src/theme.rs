// ABOUTME: Light/dark theme switching: data-theme on the root element, the toggle checkbox, and persistence.
// ABOUTME: Startup restores the saved theme; a checkbox change picks dark when checked.

use std::fmt;
use std::str::FromStr;

use dom_query::Document;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::error::PageError;
use crate::prefs::{PreferenceStore, THEME_KEY};

const ROOT: &str = "html";
const TOGGLE: &str = "#checkbox";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The theme a toggle checkbox state stands for.
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PageError::UnknownTheme(other.to_string())),
        }
    }
}

/// The stored theme, or `fallback` when nothing valid is stored.
pub fn saved_theme(store: &dyn PreferenceStore, fallback: Theme) -> Theme {
    match store.get(THEME_KEY) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::debug!(stored = %raw, "ignoring unknown stored theme");
            fallback
        }),
        None => fallback,
    }
}

/// Applies a theme to the document and saves it.
pub fn apply_theme(
    doc: &Document,
    store: &mut dyn PreferenceStore,
    theme: Theme,
) -> Result<(), PageError> {
    if let Some(root) = dom::find(doc, ROOT) {
        root.set_attr("data-theme", theme.as_str());
    }
    store.set(THEME_KEY, theme.as_str())?;
    if let Some(toggle) = dom::find(doc, TOGGLE) {
        dom::set_flag(&toggle, "checked", theme == Theme::Dark);
    }
    Ok(())
}

/// Handles a change of the toggle checkbox.
pub fn on_toggle_change(
    doc: &Document,
    store: &mut dyn PreferenceStore,
    checked: bool,
) -> Result<Theme, PageError> {
    let theme = Theme::from_checked(checked);
    apply_theme(doc, store, theme)?;
    Ok(theme)
}

/// The theme the document currently shows, read from `data-theme`.
pub fn current_theme(doc: &Document) -> Option<Theme> {
    dom::find(doc, ROOT)?.attr("data-theme")?.parse().ok()
}
