//! # tabledraw
//!
//! Converts tables written as Markdown, HTML or CSV into Excalidraw diagrams.
//!
//! ## Features
//!
//! - **Three Input Formats**: Markdown pipe tables, HTML `<table>` markup, CSV
//! - **Format Detection**: confidence-ranked detectors with a parser fallback chain
//! - **Content-Driven Layout**: column widths and row heights follow the cell text
//! - **Bound Elements**: every cell is a rectangle with its text bound inside
//! - **Styles**: hand-drawn and solid presets, dark mode, TOML config files
//! - **AI Flows**: generate or improve Markdown tables through a pluggable backend
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Table Conversion
//!
//! ```rust
//! use tabledraw::convert_table;
//!
//! let doc = convert_table("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
//! assert_eq!(doc.elements.len(), 8);
//!
//! let json = doc.to_json().unwrap();
//! assert!(json.contains("\"type\":\"excalidraw\""));
//! ```
//!
//! ### Custom Styling
//!
//! ```rust
//! use tabledraw::{convert_table_with_options, LayoutOptions};
//!
//! let options = LayoutOptions::solid().dark().with_header();
//! let doc = convert_table_with_options("Name,Age\nAlice,30", &options).unwrap();
//! assert_eq!(doc.app_state["theme"], "dark");
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - Excalidraw constants
pub mod data;

/// Feature modules - AI prompt flows
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core modules
pub use crate::core::document;
pub use crate::core::elements;
pub use crate::core::layout;
pub use crate::core::table;

pub use crate::core::convert::{
    convert_grid, convert_table, convert_table_with, convert_table_with_options, Conversion,
};
pub use crate::core::document::{assemble, Document};
pub use crate::core::elements::{Element, RectangleElement, TextElement};
pub use crate::core::layout::{
    IdGenerator, LayoutConfig, LayoutEngine, LayoutOptions, LayoutStyle, RandomIds, SequentialIds,
};
pub use crate::core::table::{
    detect_format, parse_csv_table, parse_html_table, parse_markdown_table, parse_table,
    parse_table_as, Grid, ParsedTable, TableFormat,
};

// Re-export data modules
pub use data::constants;

// Re-export feature modules
pub use features::ai;

// Re-export utilities
pub use utils::error::{ConversionError, ConversionResult};

/// Convert a table to Excalidraw JSON
///
/// # Arguments
/// * `input` - Markdown, HTML or CSV table text
///
/// # Returns
/// The document serialized as compact JSON
pub fn table_to_excalidraw_json(input: &str) -> ConversionResult<String> {
    convert_table(input)?.to_json()
}

/// Convert a table to Excalidraw JSON with custom options
///
/// # Arguments
/// * `input` - Markdown, HTML or CSV table text
/// * `options` - Layout options
/// * `pretty` - Indent the JSON output
pub fn table_to_excalidraw_json_with_options(
    input: &str,
    options: &LayoutOptions,
    pretty: bool,
) -> ConversionResult<String> {
    let doc = convert_table_with_options(input, options)?;
    if pretty {
        doc.to_json_pretty()
    } else {
        doc.to_json()
    }
}

/// Name of the detected input format
///
/// Returns "markdown", "html", "csv", or "unknown" based on content analysis.
pub fn detect_format_name(input: &str) -> &'static str {
    detect_format(input)
        .map(|format| format.as_str())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_table_to_json_markdown() {
        let json = table_to_excalidraw_json("| A | B |\n|---|---|\n| 1 | 2 |").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "excalidraw");
        assert_eq!(value["version"], 2);
        assert_eq!(value["source"], "https://excalidraw.com");
        assert_eq!(value["elements"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_table_to_json_csv() {
        let json = table_to_excalidraw_json("Name,Age\nAlice,30").unwrap();
        assert!(json.contains("\"originalText\":\"Alice\""));
    }

    #[test]
    fn test_table_to_json_failure() {
        assert!(table_to_excalidraw_json("just some text")
            .unwrap_err()
            .is_parse_failure());
        assert_eq!(
            table_to_excalidraw_json(""),
            Err(ConversionError::EmptyInput)
        );
    }

    #[test]
    fn test_pretty_output() {
        let pretty =
            table_to_excalidraw_json_with_options("a,b\nc,d", &LayoutOptions::default(), true)
                .unwrap();
        let compact =
            table_to_excalidraw_json_with_options("a,b\nc,d", &LayoutOptions::default(), false)
                .unwrap();
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_dark_solid_options() {
        let options = LayoutOptions::solid().dark();
        let json = table_to_excalidraw_json_with_options("a,b\nc,d", &options, false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["appState"]["theme"], "dark");
        assert_eq!(value["elements"][0]["roughness"], 0);
        assert_eq!(value["elements"][0]["strokeColor"], "#e2e8f0");
    }

    #[test]
    fn test_detect_format_name() {
        assert_eq!(detect_format_name("| A | B |\n|---|---|"), "markdown");
        assert_eq!(detect_format_name("<table><tr><td>x</td></tr></table>"), "html");
        assert_eq!(detect_format_name("a,b\nc,d"), "csv");
        assert_eq!(detect_format_name("hello"), "unknown");
    }
}
