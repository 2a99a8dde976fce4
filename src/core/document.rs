//! Document Assembler
//!
//! Wraps an element list in the Excalidraw document envelope.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::elements::Element;
use crate::core::layout::LayoutOptions;
use crate::data::constants::{EXCALIDRAW_TYPE, EXCALIDRAW_VERSION};
use crate::utils::error::{ConversionError, ConversionResult};

/// An Excalidraw document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub version: u32,
    pub source: String,
    pub elements: Vec<Element>,
    /// Viewport and appearance settings
    pub app_state: Map<String, Value>,
}

impl Document {
    /// Envelope with no elements and no appearance settings
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            doc_type: EXCALIDRAW_TYPE.to_string(),
            version: EXCALIDRAW_VERSION,
            source: source.into(),
            elements: Vec::new(),
            app_state: Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn to_json(&self) -> ConversionResult<String> {
        serde_json::to_string(self).map_err(|e| ConversionError::internal(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> ConversionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConversionError::internal(e.to_string()))
    }
}

/// Default viewport block: grid snapping off, canvas color and theme
pub fn default_app_state(options: &LayoutOptions) -> Map<String, Value> {
    let mut app_state = Map::new();
    app_state.insert("gridSize".to_string(), Value::Null);
    app_state.insert(
        "viewBackgroundColor".to_string(),
        json!(options.view_background_color),
    );
    app_state.insert("theme".to_string(), json!(options.theme));
    app_state
}

/// Wrap elements in a document; the elements are passed through unchanged
pub fn assemble(elements: Vec<Element>, options: &LayoutOptions) -> Document {
    Document {
        doc_type: EXCALIDRAW_TYPE.to_string(),
        version: EXCALIDRAW_VERSION,
        source: options.source.clone(),
        elements,
        app_state: default_app_state(options),
    }
}
