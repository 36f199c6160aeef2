// ABOUTME: Documentation sidebar toggle for small screens.
// ABOUTME: Swaps the menu button icon between menu_book and close to match the sidebar state.

use dom_query::Document;

use crate::dom;

const BUTTON: &str = "#doc-menu-btn";
const SIDEBAR: &str = "#docs-sidebar";
const ICON: &str = "#doc-menu-btn .material-icons";

pub const ICON_OPEN: &str = "close";
pub const ICON_CLOSED: &str = "menu_book";

fn set_icon(doc: &Document, open: bool) {
    if let Some(icon) = dom::find(doc, ICON) {
        dom::set_text(&icon, if open { ICON_OPEN } else { ICON_CLOSED });
    }
}

/// Toggles the sidebar. Returns the new open state, or None if the page has no doc sidebar.
pub fn toggle_doc_sidebar(doc: &Document) -> Option<bool> {
    dom::find(doc, BUTTON)?;
    let sidebar = dom::find(doc, SIDEBAR)?;
    let open = dom::toggle_class(&sidebar, "active");
    set_icon(doc, open);
    Some(open)
}

/// Closes the sidebar, as following a `.doc-link` does.
pub fn close_doc_sidebar(doc: &Document) -> bool {
    let (Some(_), Some(sidebar)) = (dom::find(doc, BUTTON), dom::find(doc, SIDEBAR)) else {
        return false;
    };
    sidebar.remove_class("active");
    set_icon(doc, false);
    true
}
