// ABOUTME: Page behaviors for the devsite pages: theme, navigation, sidebar, read time, translation, calculator.
// ABOUTME: Each behavior is a small function over a parsed document; Page runs them as the load sequence.

//! devsite-page - the page-behavior layer of the developer tools site.
//!
//! # Example
//!
//! ```
//! use devsite_page::{Catalog, MemoryStore, Page, SiteOptions};
//!
//! let mut page = Page::parse(r#"<html><body><ul class="nav-links"><a href="/products">Products</a></ul></body></html>"#);
//! let mut store = MemoryStore::new();
//! let report = page
//!     .boot(&SiteOptions::default(), &Catalog::builtin(), &mut store, "https://devsite.example/")
//!     .unwrap();
//! assert_eq!(report.nav_active, 1);
//! ```

pub mod calculator;
pub mod clipboard;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod nav;
pub mod options;
pub mod page;
pub mod prefs;
pub mod read_time;
pub mod sidebar;
pub mod theme;

pub use crate::calculator::CalculatorPanel;
pub use crate::clipboard::{Clipboard, CommandClipboard, MemoryClipboard, Toast};
pub use crate::error::PageError;
pub use crate::i18n::{Catalog, TranslationReport};
pub use crate::nav::NavHighlight;
pub use crate::options::{default_config_path, SiteConfig, SiteOptions, SiteOptionsBuilder};
pub use crate::page::{BootReport, Page};
pub use crate::prefs::{default_prefs_path, JsonFileStore, MemoryStore, PreferenceStore};
pub use crate::read_time::{estimate_html, estimate_text, ReadTime};
pub use crate::theme::Theme;
