// ABOUTME: DOM helpers shared by the page adapters: a compiled selector cache and class/text mutation.
// ABOUTME: Every adapter touches the document only through these functions.

//! Thin mutation layer over `dom_query`.
//!
//! Selectors are compiled once and kept in a process-wide cache. Lookups that
//! match nothing return `None`, so adapters can no-op when the page does not
//! carry the elements they drive.

use std::collections::HashMap;
use std::sync::RwLock;

use dom_query::{Document, Matcher, Selection};
use once_cell::sync::Lazy;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Matcher>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector. Invalid selectors are cached as `None`.
pub fn compiled(css: &str) -> Option<Matcher> {
    {
        let cache = SELECTOR_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let matcher = Matcher::new(css).ok();
    let mut cache = SELECTOR_CACHE.write().unwrap_or_else(|e| e.into_inner());
    cache
        .entry(css.to_string())
        .or_insert(matcher)
        .clone()
}

/// Selects matching elements, or `None` when the selector is invalid or matches nothing.
pub fn find<'a>(doc: &'a Document, css: &str) -> Option<Selection<'a>> {
    let matcher = compiled(css)?;
    let sel = doc.select_matcher(&matcher);
    if sel.exists() {
        Some(sel)
    } else {
        None
    }
}

/// Adds or removes `class`, returning whether it is present afterwards.
pub fn toggle_class(sel: &Selection, class: &str) -> bool {
    if sel.has_class(class) {
        sel.remove_class(class);
        false
    } else {
        sel.add_class(class);
        true
    }
}

/// Sets or clears a boolean attribute such as `checked`.
pub fn set_flag(sel: &Selection, attr: &str, on: bool) {
    if on {
        sel.set_attr(attr, "");
    } else {
        sel.remove_attr(attr);
    }
}

/// Replaces the children of every selected element with a single text node.
pub fn set_text(sel: &Selection, text: &str) {
    sel.set_text(text);
}

/// Text nodes under the selection joined with spaces, so `a<br>b` reads as two words.
pub fn spaced_text(sel: &Selection) -> String {
    sel.nodes()
        .iter()
        .flat_map(|node| node.descendants())
        .filter(|node| node.is_text())
        .map(|node| node.text().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visible text of the selection with whitespace runs collapsed.
pub fn text_of(sel: &Selection) -> String {
    sel.text().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_selector_is_cached_as_none() {
        assert!(compiled("[[[invalid").is_none());
        assert!(compiled("[[[invalid").is_none());
        assert!(compiled("nav a.active").is_some());
    }

    #[test]
    fn test_find_returns_none_without_match() {
        let doc = Document::from("<html><body><p>hi</p></body></html>");
        assert!(find(&doc, "#missing").is_none());
        assert!(find(&doc, "p").is_some());
    }

    #[test]
    fn test_toggle_class_round_trip() {
        let doc = Document::from(r#"<html><body><ul class="nav-links"></ul></body></html>"#);
        let sel = find(&doc, ".nav-links").unwrap();
        assert!(toggle_class(&sel, "active"));
        assert!(sel.has_class("active"));
        assert!(!toggle_class(&sel, "active"));
        assert!(!sel.has_class("active"));
    }

    #[test]
    fn test_set_text_escapes_markup() {
        let doc = Document::from(r#"<html><body><code id="out">old</code></body></html>"#);
        let sel = find(&doc, "#out").unwrap();
        set_text(&sel, "a < b & c \"q\"");
        assert_eq!(sel.text().to_string(), "a < b & c \"q\"");
        assert!(doc.html().contains("a &lt; b &amp; c"));
        assert!(!doc.html().contains("<b"));
    }

    #[test]
    fn test_spaced_text_separates_text_nodes() {
        let doc = Document::from(r#"<html><body><div id="post"><p>one</p>two<br>three</div></body></html>"#);
        let sel = find(&doc, "#post").unwrap();
        assert_eq!(
            spaced_text(&sel).split_whitespace().collect::<Vec<_>>(),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_set_flag() {
        let doc = Document::from(r#"<html><body><input id="checkbox" type="checkbox"></body></html>"#);
        let sel = find(&doc, "#checkbox").unwrap();
        set_flag(&sel, "checked", true);
        assert!(sel.attr("checked").is_some());
        set_flag(&sel, "checked", false);
        assert!(sel.attr("checked").is_none());
    }
}
