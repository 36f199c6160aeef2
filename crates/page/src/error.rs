// ABOUTME: Error types for the page adapters.
// ABOUTME: Provides PageError covering URLs, preferences, configuration, translation catalogs, and the clipboard.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the page adapters.
///
/// Clamp skips are not errors here; they come back as `devsite_fluid::ClampError`.
#[derive(Debug, Error)]
pub enum PageError {
    /// The current page URL could not be parsed.
    #[error("invalid page URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A theme name other than light or dark.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// The translation catalog has no table for this locale.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON preference file or catalog is malformed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML config file is malformed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The clipboard refused the text.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Copy was requested before any expression was displayed.
    #[error("nothing to copy: no clamp expression has been computed")]
    NothingToCopy,
}

impl PageError {
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        PageError::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PageError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn clipboard(err: impl fmt::Display) -> Self {
        PageError::Clipboard(err.to_string())
    }

    /// Returns true if this is an Io error.
    pub fn is_io(&self) -> bool {
        matches!(self, PageError::Io { .. })
    }

    /// Returns true if this is a Clipboard or NothingToCopy error.
    pub fn is_clipboard(&self) -> bool {
        matches!(self, PageError::Clipboard(_) | PageError::NothingToCopy)
    }
}
