// ABOUTME: Configuration for the page adapters: SiteOptions, its fluent builder, and the TOML config file.
// ABOUTME: SiteConfig fields are all optional and only override what they name.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use devsite_fluid::ClampRequest;
use serde::Deserialize;

use crate::clipboard::DEFAULT_TOAST_DURATION;
use crate::error::PageError;
use crate::read_time::DEFAULT_WORDS_PER_MINUTE;
use crate::theme::Theme;

/// Settings shared by every page behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteOptions {
    pub words_per_minute: u32,
    pub toast_duration: Duration,
    pub default_theme: Theme,
    pub default_locale: String,
    /// What the calculator's reset button restores.
    pub calculator_defaults: ClampRequest,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            toast_duration: DEFAULT_TOAST_DURATION,
            default_theme: Theme::Light,
            default_locale: "en".to_string(),
            calculator_defaults: ClampRequest::default(),
        }
    }
}

impl SiteOptions {
    pub fn builder() -> SiteOptionsBuilder {
        SiteOptionsBuilder::new()
    }
}

/// Builder for SiteOptions.
#[derive(Debug, Clone)]
pub struct SiteOptionsBuilder {
    opts: SiteOptions,
}

impl SiteOptionsBuilder {
    pub fn new() -> Self {
        Self {
            opts: SiteOptions::default(),
        }
    }

    /// Set the reading speed. Zero is raised to one.
    pub fn words_per_minute(mut self, wpm: u32) -> Self {
        self.opts.words_per_minute = wpm.max(1);
        self
    }

    /// Set how long the copy confirmation stays visible.
    pub fn toast_duration(mut self, duration: Duration) -> Self {
        self.opts.toast_duration = duration;
        self
    }

    /// Set the theme used when nothing is saved.
    pub fn default_theme(mut self, theme: Theme) -> Self {
        self.opts.default_theme = theme;
        self
    }

    /// Set the locale used for translation fallback.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.opts.default_locale = locale.into();
        self
    }

    /// Set the values the calculator resets to.
    pub fn calculator_defaults(mut self, request: ClampRequest) -> Self {
        self.opts.calculator_defaults = request;
        self
    }

    pub fn build(self) -> SiteOptions {
        self.opts
    }
}

impl Default for SiteOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk overrides, e.g.
///
/// ```toml
/// words_per_minute = 230
/// toast_duration_ms = 1500
/// default_theme = "dark"
///
/// [calculator]
/// min_size_px = 18
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub words_per_minute: Option<u32>,
    pub toast_duration_ms: Option<u64>,
    pub default_theme: Option<Theme>,
    pub default_locale: Option<String>,
    pub calculator: Option<CalculatorConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    pub min_size_px: Option<f64>,
    pub max_size_px: Option<f64>,
    pub min_viewport_px: Option<f64>,
    pub max_viewport_px: Option<f64>,
    pub base_rem_px: Option<f64>,
}

impl CalculatorConfig {
    fn over(&self, base: ClampRequest) -> ClampRequest {
        ClampRequest::new(
            self.min_size_px.unwrap_or(base.min_size_px),
            self.max_size_px.unwrap_or(base.max_size_px),
            self.min_viewport_px.unwrap_or(base.min_viewport_px),
            self.max_viewport_px.unwrap_or(base.max_viewport_px),
            self.base_rem_px.unwrap_or(base.base_rem_px),
        )
    }
}

impl SiteConfig {
    pub fn from_toml(text: &str) -> Result<Self, PageError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let text = fs::read_to_string(path).map_err(|e| PageError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Loads the file if it exists, otherwise returns an empty config.
    pub fn load_optional(path: &Path) -> Result<Self, PageError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PageError::io(path, e)),
        }
    }

    /// Applies the overrides on top of a builder.
    pub fn apply(&self, mut builder: SiteOptionsBuilder) -> SiteOptionsBuilder {
        if let Some(wpm) = self.words_per_minute {
            builder = builder.words_per_minute(wpm);
        }
        if let Some(ms) = self.toast_duration_ms {
            builder = builder.toast_duration(Duration::from_millis(ms));
        }
        if let Some(theme) = self.default_theme {
            builder = builder.default_theme(theme);
        }
        if let Some(locale) = &self.default_locale {
            builder = builder.default_locale(locale.clone());
        }
        if let Some(calc) = &self.calculator {
            let base = builder.opts.calculator_defaults;
            builder = builder.calculator_defaults(calc.over(base));
        }
        builder
    }

    pub fn into_options(self) -> SiteOptions {
        self.apply(SiteOptions::builder()).build()
    }
}

/// `<config dir>/devsite/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("devsite").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let opts = SiteOptions::default();
        assert_eq!(opts.words_per_minute, 200);
        assert_eq!(opts.toast_duration, Duration::from_millis(2500));
        assert_eq!(opts.default_theme, Theme::Light);
        assert_eq!(opts.calculator_defaults, ClampRequest::new(16.0, 48.0, 320.0, 1600.0, 16.0));
    }

    #[test]
    fn test_builder_clamps_wpm() {
        let opts = SiteOptions::builder().words_per_minute(0).build();
        assert_eq!(opts.words_per_minute, 1);
    }

    #[test]
    fn test_config_overrides() {
        let config = SiteConfig::from_toml(
            r#"
words_per_minute = 230
toast_duration_ms = 1500
default_theme = "dark"

[calculator]
min_size_px = 18
"#,
        )
        .unwrap();
        let opts = config.into_options();
        assert_eq!(opts.words_per_minute, 230);
        assert_eq!(opts.toast_duration, Duration::from_millis(1500));
        assert_eq!(opts.default_theme, Theme::Dark);
        assert_eq!(opts.default_locale, "en");
        assert_eq!(opts.calculator_defaults, ClampRequest::new(18.0, 48.0, 320.0, 1600.0, 16.0));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        assert!(matches!(
            SiteConfig::from_toml("colour = \"red\""),
            Err(PageError::Config(_))
        ));
    }

    #[test]
    fn test_load_optional_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = SiteConfig::load_optional(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
