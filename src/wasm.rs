//! WASM bindings for tabledraw
//!
//! This module provides JavaScript-accessible functions for table → Excalidraw conversion.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::Serialize;

#[cfg(feature = "wasm")]
use crate::{ConversionError, LayoutConfig};

/// Parse result with the detected format (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct ParseTableResult {
    /// Format the input was parsed as
    pub format: String,
    /// Rows of cell strings
    pub rows: Vec<Vec<String>>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn to_js_error(err: ConversionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Read layout options from a JS object; `undefined` and `null` select the defaults
#[cfg(feature = "wasm")]
fn layout_config(options: JsValue) -> Result<LayoutConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(LayoutConfig::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| to_js_error(ConversionError::config(e.to_string())))
}

/// Convert a Markdown, HTML or CSV table to an Excalidraw document
///
/// # Arguments
/// * `input` - Table text
/// * `options` - Optional layout options, same fields as the TOML config file
///
/// # Returns
/// The document as JSON; throws with the error message on failure
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertTable")]
pub fn convert_table_wasm(input: &str, options: JsValue) -> Result<String, JsValue> {
    let options = layout_config(options)?.to_options().map_err(to_js_error)?;
    crate::convert_table_with_options(input, &options)
        .and_then(|doc| doc.to_json())
        .map_err(to_js_error)
}

/// Detect input format
///
/// Returns "markdown", "html", "csv", or "unknown".
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "detectTableFormat")]
pub fn detect_table_format_wasm(input: &str) -> String {
    crate::detect_format_name(input).to_string()
}

/// Parse a table without laying it out
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "parseTable")]
pub fn parse_table_wasm(input: &str) -> Result<JsValue, JsValue> {
    let parsed = crate::parse_table(input).map_err(to_js_error)?;
    let result = ParseTableResult {
        format: parsed.format.to_string(),
        rows: parsed.grid,
    };
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| to_js_error(ConversionError::internal(e.to_string())))
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
