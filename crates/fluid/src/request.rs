// ABOUTME: The ClampRequest value object and the five input fields it is built from.
// ABOUTME: Parses raw field text with parseFloat-style prefix rules and validates positivity.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ClampError;

// Longest numeric prefix, same grammar browsers accept in parseFloat.
static NUMBER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// One of the five calculator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    MinSize,
    MaxSize,
    MinViewport,
    MaxViewport,
    BaseRem,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::MinSize,
        Field::MaxSize,
        Field::MinViewport,
        Field::MaxViewport,
        Field::BaseRem,
    ];

    /// The element id of the field on the calculator page.
    pub fn id(self) -> &'static str {
        match self {
            Field::MinSize => "minSize",
            Field::MaxSize => "maxSize",
            Field::MinViewport => "minVW",
            Field::MaxViewport => "maxVW",
            Field::BaseRem => "baseRem",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Parses field text the way a browser's `parseFloat` does.
///
/// Leading whitespace is skipped and the longest numeric prefix wins, so
/// `"16px"` is 16. Returns None when there is no numeric prefix.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    if let Some(m) = NUMBER_PREFIX_RE.find(s) {
        return m.as_str().parse::<f64>().ok();
    }
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if unsigned.starts_with("Infinity") {
        // Parsed, but never valid.
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    None
}

/// A valid field is finite and strictly positive. Zero counts as missing.
fn check_positive(field: Field, value: f64) -> Result<f64, ClampError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ClampError::not_positive(field, value))
    }
}

/// Raw text of the five fields, as read from an input surface.
///
/// `None` means the field was absent, which is different from present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFields {
    pub min_size: Option<String>,
    pub max_size: Option<String>,
    pub min_viewport: Option<String>,
    pub max_viewport: Option<String>,
    pub base_rem: Option<String>,
}

impl RawFields {
    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::MinSize => &self.min_size,
            Field::MaxSize => &self.max_size,
            Field::MinViewport => &self.min_viewport,
            Field::MaxViewport => &self.max_viewport,
            Field::BaseRem => &self.base_rem,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            Field::MinSize => self.min_size = value,
            Field::MaxSize => self.max_size = value,
            Field::MinViewport => self.min_viewport = value,
            Field::MaxViewport => self.max_viewport = value,
            Field::BaseRem => self.base_rem = value,
        }
    }
}

impl From<&ClampRequest> for RawFields {
    fn from(req: &ClampRequest) -> Self {
        let mut raw = RawFields::default();
        for field in Field::ALL {
            raw.set(field, req.get(field).to_string());
        }
        raw
    }
}

/// The five numeric inputs of one clamp computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampRequest {
    pub min_size_px: f64,
    pub max_size_px: f64,
    pub min_viewport_px: f64,
    pub max_viewport_px: f64,
    pub base_rem_px: f64,
}

impl Default for ClampRequest {
    /// The calculator's reset values: 16px to 48px between 320px and 1600px, 16px root.
    fn default() -> Self {
        Self::new(16.0, 48.0, 320.0, 1600.0, 16.0)
    }
}

impl ClampRequest {
    pub fn new(
        min_size_px: f64,
        max_size_px: f64,
        min_viewport_px: f64,
        max_viewport_px: f64,
        base_rem_px: f64,
    ) -> Self {
        Self {
            min_size_px,
            max_size_px,
            min_viewport_px,
            max_viewport_px,
            base_rem_px,
        }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::MinSize => self.min_size_px,
            Field::MaxSize => self.max_size_px,
            Field::MinViewport => self.min_viewport_px,
            Field::MaxViewport => self.max_viewport_px,
            Field::BaseRem => self.base_rem_px,
        }
    }

    /// Builds a request from raw field text.
    ///
    /// Fields are checked in input order and the first bad one is reported.
    pub fn parse(raw: &RawFields) -> Result<Self, ClampError> {
        let mut values = [0.0f64; 5];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            let text = raw.get(field).ok_or_else(|| ClampError::missing(field))?;
            let value = parse_number(text).ok_or_else(|| {
                if text.trim().is_empty() {
                    ClampError::missing(field)
                } else {
                    ClampError::not_a_number(field, text)
                }
            })?;
            *slot = check_positive(field, value)?;
        }
        let [min_size, max_size, min_vw, max_vw, base] = values;
        Ok(Self::new(min_size, max_size, min_vw, max_vw, base))
    }

    /// Checks every field is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ClampError> {
        for field in Field::ALL {
            check_positive(field, self.get(field))?;
        }
        Ok(())
    }
}
