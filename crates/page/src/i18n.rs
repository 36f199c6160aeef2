// ABOUTME: Static UI text translation driven by data-i18n attributes and a locale catalog.
// ABOUTME: Catalogs load from JSON; a built-in English/Spanish table covers the site chrome.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dom_query::Document;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::error::PageError;
use crate::prefs::{PreferenceStore, LOCALE_KEY};

const KEYED: &str = "[data-i18n]";
const KEY_ATTR: &str = "data-i18n";

const BUILTIN_EN: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.products", "Products"),
    ("nav.blog", "Blog"),
    ("nav.docs", "Docs"),
    ("nav.about", "About"),
    ("theme.toggle", "Dark mode"),
    ("calc.title", "Fluid Type Calculator"),
    ("calc.min_size", "Min font size (px)"),
    ("calc.max_size", "Max font size (px)"),
    ("calc.min_vw", "Min viewport (px)"),
    ("calc.max_vw", "Max viewport (px)"),
    ("calc.base_rem", "Root font size (px)"),
    ("calc.slope", "Slope"),
    ("calc.base", "Intercept"),
    ("calc.copy", "Copy"),
    ("calc.reset", "Reset"),
    ("calc.copied", "Copied!"),
    ("docs.menu", "Contents"),
];

const BUILTIN_ES: &[(&str, &str)] = &[
    ("nav.home", "Inicio"),
    ("nav.products", "Productos"),
    ("nav.blog", "Blog"),
    ("nav.docs", "Documentación"),
    ("nav.about", "Acerca de"),
    ("theme.toggle", "Modo oscuro"),
    ("calc.title", "Calculadora de tipografía fluida"),
    ("calc.min_size", "Tamaño mínimo (px)"),
    ("calc.max_size", "Tamaño máximo (px)"),
    ("calc.min_vw", "Viewport mínimo (px)"),
    ("calc.max_vw", "Viewport máximo (px)"),
    ("calc.base_rem", "Tamaño raíz (px)"),
    ("calc.slope", "Pendiente"),
    ("calc.base", "Intersección"),
    ("calc.copy", "Copiar"),
    ("calc.reset", "Restablecer"),
    ("calc.copied", "¡Copiado!"),
    ("docs.menu", "Contenido"),
];

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Translations keyed by locale, then by message key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub default_locale: String,
    pub locales: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    /// The table shipped with the site.
    pub fn builtin() -> Self {
        let mut locales = BTreeMap::new();
        locales.insert("en".to_string(), table(BUILTIN_EN));
        locales.insert("es".to_string(), table(BUILTIN_ES));
        Self {
            default_locale: "en".to_string(),
            locales,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let json = fs::read_to_string(path).map_err(|e| PageError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Looks a key up in `locale`, falling back to the default locale.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .and_then(|t| t.get(key))
            .or_else(|| {
                self.locales
                    .get(&self.default_locale)
                    .and_then(|t| t.get(key))
            })
            .map(String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// What a translation pass changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub locale: String,
    pub translated: usize,
    pub missing: Vec<String>,
}

/// Translates every `[data-i18n]` element into `locale` and saves the choice.
///
/// Elements whose key is unknown in both the locale and the default keep their text.
pub fn translate_page(
    doc: &Document,
    catalog: &Catalog,
    store: &mut dyn PreferenceStore,
    locale: &str,
) -> Result<TranslationReport, PageError> {
    if !catalog.has_locale(locale) {
        return Err(PageError::UnknownLocale(locale.to_string()));
    }

    let mut report = TranslationReport {
        locale: locale.to_string(),
        translated: 0,
        missing: Vec::new(),
    };

    if let Some(keyed) = dom::find(doc, KEYED) {
        for el in keyed.iter() {
            let Some(key) = el.attr(KEY_ATTR) else {
                continue;
            };
            match catalog.lookup(locale, &key) {
                Some(text) => {
                    dom::set_text(&el, text);
                    report.translated += 1;
                }
                None => {
                    tracing::debug!(key = %key, locale, "no translation");
                    report.missing.push(key.to_string());
                }
            }
        }
    }

    if let Some(root) = dom::find(doc, "html") {
        root.set_attr("lang", locale);
    }
    store.set(LOCALE_KEY, locale)?;
    Ok(report)
}

/// The stored locale, if the catalog still knows it.
pub fn saved_locale(store: &dyn PreferenceStore, catalog: &Catalog) -> Option<String> {
    store.get(LOCALE_KEY).filter(|l| catalog.has_locale(l))
}
