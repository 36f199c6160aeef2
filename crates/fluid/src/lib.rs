// ABOUTME: Fluid typography library for devsite: computes CSS clamp() expressions from five inputs.
// ABOUTME: Re-exports the public API: compute, ClampRequest, RawFields, Field, ClampResult, Fixed3, ClampError.

//! devsite-fluid - the clamp() calculator behind the fluid type tool.
//!
//! # Example
//!
//! ```
//! use devsite_fluid::{compute, ClampRequest};
//!
//! let result = compute(ClampRequest::new(16.0, 48.0, 320.0, 1600.0, 16.0)).unwrap();
//! assert_eq!(result.expression, "clamp(1.000rem, 0.500rem + 2.500vw, 3.000rem)");
//! ```

pub mod engine;
pub mod error;
pub mod request;

pub use crate::engine::{compute, ClampResult, Fixed3};
pub use crate::error::{ClampError, SkipKind};
pub use crate::request::{parse_number, ClampRequest, Field, RawFields};

/// Parses raw field text and computes in one step.
pub fn compute_raw(raw: &RawFields) -> Result<ClampResult, ClampError> {
    compute(ClampRequest::parse(raw)?)
}
