// ABOUTME: Site navigation behaviors: the mobile menu toggle and active-link highlighting.
// ABOUTME: Highlight decisions are computed from the current URL and link hrefs before touching the DOM.

//! Navigation.
//!
//! Highlighting rules, applied after clearing `active` from every nav link:
//! - any path containing `/blog` marks `#nav-blog`;
//! - on the site root, links ending in `/products` are marked;
//! - a link whose path equals the current path is marked (case-insensitive,
//!   trailing slash ignored).

use dom_query::Document;
use url::Url;

use crate::dom;
use crate::error::PageError;

const MENU_BUTTON: &str = "#mobile-menu-btn";
const NAV_LINKS: &str = ".nav-links";
const NAV_ANCHORS: &str = ".nav-links a";
const BLOG_LINK: &str = "#nav-blog";
const ACTIVE: &str = "active";

/// Toggles the mobile menu. Returns the new open state, or None if the page has no menu.
pub fn toggle_mobile_nav(doc: &Document) -> Option<bool> {
    let button = dom::find(doc, MENU_BUTTON)?;
    let links = dom::find(doc, NAV_LINKS)?;
    let open = dom::toggle_class(&links, ACTIVE);
    if open {
        button.add_class("is-active");
    } else {
        button.remove_class("is-active");
    }
    Some(open)
}

/// Which nav elements should carry `active`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavHighlight {
    /// One flag per nav link, in document order.
    pub links: Vec<bool>,
    /// Whether `#nav-blog` is marked.
    pub blog: bool,
}

impl NavHighlight {
    pub fn active_count(&self) -> usize {
        self.links.iter().filter(|a| **a).count()
    }
}

fn normalized_path(url: &Url) -> String {
    let path = url.path().to_lowercase();
    match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Decides the highlight for a page at `current_url` whose nav links have these hrefs.
///
/// Hrefs resolve against the current URL; ones that fail to resolve are never active.
pub fn decide_highlight(current_url: &str, hrefs: &[Option<String>]) -> Result<NavHighlight, PageError> {
    let current = Url::parse(current_url).map_err(|e| PageError::invalid_url(current_url, e))?;
    let current_path = normalized_path(&current);
    let on_root = current.path() == "/";

    let links = hrefs
        .iter()
        .map(|href| {
            let Some(resolved) = href.as_deref().and_then(|h| current.join(h).ok()) else {
                return false;
            };
            let absolute = resolved.as_str().to_lowercase();
            (on_root && absolute.ends_with("/products")) || normalized_path(&resolved) == current_path
        })
        .collect();

    Ok(NavHighlight {
        links,
        blog: current_path.contains("/blog"),
    })
}

/// Clears and re-applies `active` on the nav links for the page at `current_url`.
pub fn highlight_nav(doc: &Document, current_url: &str) -> Result<NavHighlight, PageError> {
    let found = dom::find(doc, NAV_ANCHORS);
    let anchors: Vec<_> = found
        .as_ref()
        .map(|sel| sel.iter().collect())
        .unwrap_or_default();
    let hrefs: Vec<Option<String>> = anchors
        .iter()
        .map(|a| a.attr("href").map(|h| h.to_string()))
        .collect();

    let highlight = decide_highlight(current_url, &hrefs)?;

    for (anchor, active) in anchors.iter().zip(&highlight.links) {
        anchor.remove_class(ACTIVE);
        if *active {
            anchor.add_class(ACTIVE);
        }
    }
    if highlight.blog {
        match dom::find(doc, BLOG_LINK) {
            Some(blog) => blog.add_class(ACTIVE),
            None => tracing::debug!("blog path but page has no #nav-blog"),
        }
    }

    tracing::debug!(
        url = current_url,
        active = highlight.active_count(),
        blog = highlight.blog,
        "highlighted nav"
    );
    Ok(highlight)
}
