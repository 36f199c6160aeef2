// ABOUTME: Error types for the clamp formula engine.
// ABOUTME: Every ClampError is a skipped computation; SkipKind groups them into the two user-facing categories.

use std::fmt;

use thiserror::Error;

use crate::request::Field;

/// The two categories a skipped computation falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    InvalidInput,
    DegenerateViewportRange,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipKind::InvalidInput => "invalid input",
            SkipKind::DegenerateViewportRange => "degenerate viewport range",
        };
        write!(f, "{}", s)
    }
}

/// Reasons the engine declined to produce a result.
///
/// None of these are fatal. Callers keep whatever they rendered last.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClampError {
    /// The field had no value at all.
    #[error("{field} is missing")]
    Missing { field: Field },

    /// The field text has no numeric prefix.
    #[error("{field} is not a number: {raw:?}")]
    NotANumber { field: Field, raw: String },

    /// Zero, negative, or non-finite.
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: Field, value: f64 },

    /// Min and max viewport widths are equal, so the slope is undefined.
    #[error("viewport range is degenerate: min and max are both {viewport_px}px")]
    DegenerateViewportRange { viewport_px: f64 },

    /// An intermediate value overflowed.
    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },
}

impl ClampError {
    pub fn missing(field: Field) -> Self {
        ClampError::Missing { field }
    }

    pub fn not_a_number(field: Field, raw: impl Into<String>) -> Self {
        ClampError::NotANumber {
            field,
            raw: raw.into(),
        }
    }

    pub fn not_positive(field: Field, value: f64) -> Self {
        ClampError::NotPositive { field, value }
    }

    /// Returns the user-facing category of this skip.
    pub fn kind(&self) -> SkipKind {
        match self {
            ClampError::DegenerateViewportRange { .. } => SkipKind::DegenerateViewportRange,
            _ => SkipKind::InvalidInput,
        }
    }

    /// Returns the offending field, when one field is to blame.
    pub fn field(&self) -> Option<Field> {
        match self {
            ClampError::Missing { field }
            | ClampError::NotANumber { field, .. }
            | ClampError::NotPositive { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Returns true if this is an InvalidInput skip.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == SkipKind::InvalidInput
    }

    /// Returns true if this is a DegenerateViewportRange skip.
    pub fn is_degenerate(&self) -> bool {
        self.kind() == SkipKind::DegenerateViewportRange
    }
}
