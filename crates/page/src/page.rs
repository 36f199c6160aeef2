// ABOUTME: Page wraps a parsed HTML document and runs the page-load sequence over it.
// ABOUTME: Boot applies the saved theme, nav highlight, read time, saved locale, and the first calculator pass.

use dom_query::Document;
use serde::Serialize;

use devsite_fluid::ClampResult;

use crate::calculator::{self, CalculatorPanel};
use crate::error::PageError;
use crate::i18n::{self, Catalog, TranslationReport};
use crate::nav::{self, NavHighlight};
use crate::options::SiteOptions;
use crate::prefs::PreferenceStore;
use crate::read_time::{self, ReadTime};
use crate::sidebar;
use crate::theme::{self, Theme};

/// What a boot pass did to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootReport {
    pub theme: Theme,
    pub nav_active: usize,
    pub blog_active: bool,
    pub read_time: Option<ReadTime>,
    pub translation: Option<TranslationReport>,
    pub clamp: Option<ClampResult>,
}

/// A parsed page.
pub struct Page {
    doc: Document,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Document::from(html),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Serializes the page back to HTML.
    pub fn html(&self) -> String {
        self.doc.html().to_string()
    }

    /// Runs the page-load sequence for a page served at `current_url`.
    ///
    /// A stored locale other than the default is applied; a calculator page
    /// gets its first computation, which may be skipped without failing the boot.
    pub fn boot(
        &mut self,
        opts: &SiteOptions,
        catalog: &Catalog,
        store: &mut dyn PreferenceStore,
        current_url: &str,
    ) -> Result<BootReport, PageError> {
        let theme = theme::saved_theme(store, opts.default_theme);
        theme::apply_theme(&self.doc, store, theme)?;

        let NavHighlight { links, blog } = nav::highlight_nav(&self.doc, current_url)?;
        let nav_active = links.iter().filter(|a| **a).count();

        let read_time = read_time::apply_read_time(&self.doc, opts.words_per_minute);

        let translation = match i18n::saved_locale(store, catalog) {
            Some(locale) if locale != opts.default_locale => {
                Some(i18n::translate_page(&self.doc, catalog, store, &locale)?)
            }
            _ => None,
        };

        let clamp = if calculator::is_calculator_page(&self.doc) {
            let mut panel = CalculatorPanel::new(opts.clone());
            panel.refresh(&self.doc).ok().cloned()
        } else {
            None
        };

        tracing::info!(
            url = current_url,
            theme = %theme,
            nav_active,
            calculator = clamp.is_some(),
            "booted page"
        );

        Ok(BootReport {
            theme,
            nav_active,
            blog_active: blog,
            read_time,
            translation,
            clamp,
        })
    }

    pub fn set_theme(&mut self, store: &mut dyn PreferenceStore, theme: Theme) -> Result<(), PageError> {
        theme::apply_theme(&self.doc, store, theme)
    }

    pub fn translate(
        &mut self,
        catalog: &Catalog,
        store: &mut dyn PreferenceStore,
        locale: &str,
    ) -> Result<TranslationReport, PageError> {
        i18n::translate_page(&self.doc, catalog, store, locale)
    }

    pub fn toggle_mobile_nav(&mut self) -> Option<bool> {
        nav::toggle_mobile_nav(&self.doc)
    }

    pub fn toggle_doc_sidebar(&mut self) -> Option<bool> {
        sidebar::toggle_doc_sidebar(&self.doc)
    }

    pub fn close_doc_sidebar(&mut self) -> bool {
        sidebar::close_doc_sidebar(&self.doc)
    }
}
