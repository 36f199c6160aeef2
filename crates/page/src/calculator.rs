// ABOUTME: Presentation adapter for the fluid type calculator page.
// ABOUTME: Reads the five inputs, runs the engine, writes the outputs, and handles reset and copy.

//! Calculator panel.
//!
//! The panel remembers the last expression it displayed. A skipped
//! computation leaves that state, and the page, exactly as they were.

use std::time::Instant;

use devsite_fluid::{compute, compute_raw, ClampError, ClampRequest, ClampResult, Field, RawFields};
use dom_query::Document;

use crate::clipboard::{Clipboard, Toast};
use crate::dom;
use crate::error::PageError;
use crate::options::SiteOptions;

const SLOPE_OUT: &str = "#slopeOut";
const BASE_OUT: &str = "#baseOut";
const CODE_OUT: &str = "#clampCode";

pub const COPIED_MESSAGE: &str = "Copied!";

fn field_selector(field: Field) -> String {
    format!("#{}", field.id())
}

/// True when the page carries the calculator inputs.
pub fn is_calculator_page(doc: &Document) -> bool {
    dom::find(doc, &field_selector(Field::MinSize)).is_some()
}

/// Reads the `value` of each input. Absent inputs or attributes read as None.
pub fn read_fields(doc: &Document) -> RawFields {
    let mut raw = RawFields::default();
    for field in Field::ALL {
        let value = dom::find(doc, &field_selector(field)).and_then(|el| el.attr("value"));
        if let Some(value) = value {
            raw.set(field, value.to_string());
        }
    }
    raw
}

/// Writes values into the inputs that exist on the page.
pub fn write_fields(doc: &Document, raw: &RawFields) {
    for field in Field::ALL {
        if let (Some(el), Some(value)) = (dom::find(doc, &field_selector(field)), raw.get(field)) {
            el.set_attr("value", value);
        }
    }
}

/// Writes a result into the output surface.
pub fn render(doc: &Document, result: &ClampResult) {
    let outputs = [
        (SLOPE_OUT, result.slope_percent.to_string()),
        (BASE_OUT, result.base_rem.to_string()),
        (CODE_OUT, result.expression.clone()),
    ];
    for (css, text) in outputs {
        if let Some(el) = dom::find(doc, css) {
            dom::set_text(&el, &text);
        }
    }
}

/// State behind the calculator widgets.
#[derive(Debug, Clone)]
pub struct CalculatorPanel {
    opts: SiteOptions,
    displayed: Option<ClampResult>,
}

impl CalculatorPanel {
    pub fn new(opts: SiteOptions) -> Self {
        Self {
            opts,
            displayed: None,
        }
    }

    /// The result currently on screen, if any computation has succeeded.
    pub fn displayed(&self) -> Option<&ClampResult> {
        self.displayed.as_ref()
    }

    /// Recomputes from raw field text. On a skip the displayed result is kept.
    pub fn on_input(&mut self, raw: &RawFields) -> Result<&ClampResult, ClampError> {
        match compute_raw(raw) {
            Ok(result) => Ok(&*self.displayed.insert(result)),
            Err(err) => {
                tracing::debug!(error = %err, kind = %err.kind(), "clamp computation skipped");
                Err(err)
            }
        }
    }

    /// The fields a reset writes back.
    pub fn reset_fields(&self) -> RawFields {
        RawFields::from(&self.opts.calculator_defaults)
    }

    /// Restores the configured defaults and recomputes.
    pub fn reset(&mut self) -> Result<&ClampResult, ClampError> {
        let result = compute(self.opts.calculator_defaults)?;
        Ok(&*self.displayed.insert(result))
    }

    /// Copies the displayed expression and returns the confirmation toast.
    pub fn copy(&self, clipboard: &mut dyn Clipboard, now: Instant) -> Result<Toast, PageError> {
        let result = self.displayed.as_ref().ok_or(PageError::NothingToCopy)?;
        clipboard.write_text(&result.expression)?;
        Ok(Toast::new(COPIED_MESSAGE, now, self.opts.toast_duration))
    }

    /// Input event: read the page, compute, render on success.
    pub fn refresh(&mut self, doc: &Document) -> Result<&ClampResult, ClampError> {
        let raw = read_fields(doc);
        let result = self.on_input(&raw)?;
        render(doc, result);
        Ok(result)
    }

    /// Reset button: write the defaults into the inputs and refresh.
    pub fn reset_page(&mut self, doc: &Document) -> Result<&ClampResult, ClampError> {
        write_fields(doc, &self.reset_fields());
        self.refresh(doc)
    }

    pub fn defaults(&self) -> ClampRequest {
        self.opts.calculator_defaults
    }
}
