//! WASM bindings for notemark
//!
//! This module provides JavaScript-accessible functions for rendering note
//! content. Render trees cross the boundary as plain JS objects.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{Block, RenderError, RenderOptions, RenderResult};

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Options from JS; missing or malformed options fall back to defaults
#[cfg(feature = "wasm")]
fn options_from_js(options: JsValue) -> RenderOptions {
    if options.is_undefined() || options.is_null() {
        return RenderOptions::default();
    }
    serde_wasm_bindgen::from_value(options).unwrap_or_default()
}

#[cfg(feature = "wasm")]
fn to_js<T: Serialize>(value: &T) -> RenderResult<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| RenderError::serialization(e.to_string()))
}

#[cfg(feature = "wasm")]
fn into_js_error(err: RenderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Render a document to a list of blocks
///
/// # Arguments
/// * `input` - Markdown with embedded LaTeX math
/// * `options` - Optional `{ max_math_depth, max_math_len, join_display_math }`
///
/// # Returns
/// Array of block objects
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderBlock")]
pub fn render_block_wasm(input: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let opts = options_from_js(options);
    to_js(&crate::render_block_with_options(input, &opts)).map_err(into_js_error)
}

/// Render one line of content to a list of runs
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderInline")]
pub fn render_inline_wasm(input: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let opts = options_from_js(options);
    to_js(&crate::render_inline_with_options(input, &opts)).map_err(into_js_error)
}

/// Convert a LaTeX math fragment (without delimiters) to Unicode text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "processMath")]
pub fn process_math_wasm(input: &str) -> String {
    crate::process_math(input)
}

/// Flatten a block array (as returned by `renderBlock`) to plain text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "toPlainText")]
pub fn to_plain_text_wasm(blocks: JsValue) -> Result<String, JsValue> {
    let blocks: Vec<Block> = serde_wasm_bindgen::from_value(blocks)
        .map_err(|e| into_js_error(RenderError::invalid(e.to_string())))?;
    Ok(crate::to_plain_text(&blocks))
}

/// Summary of content check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Check content for spots that will render in a degraded way
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkContent")]
pub fn check_content_wasm(input: &str) -> Result<JsValue, JsValue> {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::check_content(input);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        let text = match d.line {
            Some(line) => format!("line {}: {}", line, d.message),
            None => d.message.clone(),
        };
        match d.level {
            DiagnosticLevel::Error => errors.push(text),
            DiagnosticLevel::Warning => warnings.push(text),
            DiagnosticLevel::Info => infos.push(text),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    to_js(&summary).map_err(into_js_error)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
