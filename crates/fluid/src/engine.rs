// ABOUTME: The clamp formula engine: linear interpolation between two breakpoints rendered as CSS clamp().
// ABOUTME: Pure and deterministic; anything that cannot produce a finite result is reported as a skip.

//! Fluid typography math.
//!
//! Given a size at a small viewport and a size at a large viewport, the engine
//! finds the line through both points and expresses it as
//! `clamp(min, intercept + slope·vw, max)`:
//!
//! - `slope = (max_size - min_size) / (max_vw - min_vw)`
//! - `intercept = min_size - min_vw * slope`
//! - slope is multiplied by 100 because `1vw` is 1% of the viewport width;
//!   lengths are in `rem`.
//!
//! All four numbers are rounded to three decimals, ties away from zero.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ClampError;
use crate::request::ClampRequest;

/// A number rounded to exactly three decimal places.
///
/// Serializes as its fixed-point text (`"2.500"`), which is what the page shows.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fixed3(f64);

impl Fixed3 {
    /// Rounds half away from zero at the third decimal.
    ///
    /// Results that round to zero are stored as positive zero, so they never print as `-0.000`.
    pub fn round(value: f64) -> Self {
        let rounded = (value * 1000.0).round() / 1000.0;
        if rounded == 0.0 {
            Fixed3(0.0)
        } else {
            Fixed3(rounded)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Fixed3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl Serialize for Fixed3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The output of one computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampResult {
    pub slope_percent: Fixed3,
    pub base_rem: Fixed3,
    pub min_rem: Fixed3,
    pub max_rem: Fixed3,
    pub expression: String,
}

impl ClampResult {
    /// Evaluates the rendered expression the way a browser would, in rem.
    ///
    /// CSS resolves `clamp(MIN, VAL, MAX)` as `max(MIN, min(VAL, MAX))`.
    pub fn evaluate_rem(&self, viewport_px: f64, root_px: f64) -> f64 {
        let preferred = self.preferred_rem(viewport_px, root_px);
        self.min_rem
            .value()
            .max(preferred.min(self.max_rem.value()))
    }

    /// The unclamped middle term `base + slope·vw`, in rem.
    pub fn preferred_rem(&self, viewport_px: f64, root_px: f64) -> f64 {
        let vw_px = viewport_px / 100.0;
        self.base_rem.value() + self.slope_percent.value() * vw_px / root_px
    }

    /// Renders a ready-to-paste declaration such as `font-size: clamp(...);`.
    pub fn declaration(&self, property: &str) -> String {
        format!("{}: {};", property, self.expression)
    }
}

impl fmt::Display for ClampResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, ClampError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ClampError::NonFinite { quantity })
    }
}

/// Computes the fluid clamp() formula for a request.
///
/// Every `Err` is a skipped computation: the caller must leave whatever it
/// displayed before untouched.
pub fn compute(request: ClampRequest) -> Result<ClampResult, ClampError> {
    request.validate()?;

    let ClampRequest {
        min_size_px,
        max_size_px,
        min_viewport_px,
        max_viewport_px,
        base_rem_px,
    } = request;

    if min_viewport_px == max_viewport_px {
        return Err(ClampError::DegenerateViewportRange {
            viewport_px: min_viewport_px,
        });
    }

    let slope = finite(
        "slope",
        (max_size_px - min_size_px) / (max_viewport_px - min_viewport_px),
    )?;
    let intercept = finite("intercept", -min_viewport_px * slope + min_size_px)?;

    let slope_percent = Fixed3::round(finite("slope percent", slope * 100.0)?);
    let base_rem = Fixed3::round(finite("base rem", intercept / base_rem_px)?);
    let min_rem = Fixed3::round(finite("min rem", min_size_px / base_rem_px)?);
    let max_rem = Fixed3::round(finite("max rem", max_size_px / base_rem_px)?);

    let expression = format!(
        "clamp({}rem, {}rem + {}vw, {}rem)",
        min_rem, base_rem, slope_percent, max_rem
    );

    Ok(ClampResult {
        slope_percent,
        base_rem,
        min_rem,
        max_rem,
        expression,
    })
}
