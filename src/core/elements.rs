//! Excalidraw element records
//!
//! Field names serialize in Excalidraw's camelCase, with the element kind in
//! the `type` tag.

use serde::{Deserialize, Serialize};

/// Reference from a container to an element bound inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Fields shared by every element kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: String,
    pub stroke_width: f64,
    pub stroke_style: String,
    pub roughness: u32,
    pub opacity: u32,
    pub seed: u32,
    pub version: u32,
    pub version_nonce: u32,
    pub is_deleted: bool,
    pub bound_elements: Option<Vec<BoundElement>>,
    /// Milliseconds since the Unix epoch
    pub updated: i64,
    pub link: Option<String>,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleElement {
    #[serde(flatten)]
    pub base: ElementBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub text: String,
    pub font_size: f64,
    pub font_family: u32,
    pub text_align: String,
    pub vertical_align: String,
    pub container_id: Option<String>,
    pub original_text: String,
}

/// One positioned shape or text record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rectangle(RectangleElement),
    Text(TextElement),
}

impl Element {
    pub fn base(&self) -> &ElementBase {
        match self {
            Element::Rectangle(rect) => &rect.base,
            Element::Text(text) => &text.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn as_rectangle(&self) -> Option<&RectangleElement> {
        match self {
            Element::Rectangle(rect) => Some(rect),
            Element::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(text) => Some(text),
            Element::Rectangle(_) => None,
        }
    }
}

impl RectangleElement {
    /// Ids of the elements bound inside this rectangle
    pub fn bound_ids(&self) -> impl Iterator<Item = &str> {
        self.base
            .bound_elements
            .iter()
            .flatten()
            .map(|bound| bound.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base(id: &str) -> ElementBase {
        ElementBase {
            id: id.to_string(),
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            angle: 0.0,
            stroke_color: "#1e1e1e".to_string(),
            background_color: "transparent".to_string(),
            fill_style: "hachure".to_string(),
            stroke_width: 1.0,
            stroke_style: "solid".to_string(),
            roughness: 1,
            opacity: 100,
            seed: 1,
            version: 1,
            version_nonce: 2,
            is_deleted: false,
            bound_elements: None,
            updated: 0,
            link: None,
            locked: false,
        }
    }

    #[test]
    fn test_rectangle_serializes_with_type_tag() {
        let rect = Element::Rectangle(RectangleElement { base: base("r1") });
        let value = serde_json::to_value(&rect).unwrap();
        assert_eq!(value["type"], "rectangle");
        assert_eq!(value["id"], "r1");
        assert_eq!(value["strokeColor"], "#1e1e1e");
        assert_eq!(value["versionNonce"], 2);
        assert_eq!(value["isDeleted"], false);
        assert_eq!(value["boundElements"], json!(null));
        assert_eq!(value["link"], json!(null));
    }

    #[test]
    fn test_text_serializes_text_fields() {
        let text = Element::Text(TextElement {
            base: base("t1"),
            text: "hi".to_string(),
            font_size: 20.0,
            font_family: 1,
            text_align: "center".to_string(),
            vertical_align: "middle".to_string(),
            container_id: Some("r1".to_string()),
            original_text: "hi".to_string(),
        });
        let value = serde_json::to_value(&text).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["containerId"], "r1");
        assert_eq!(value["originalText"], "hi");
        assert_eq!(value["textAlign"], "center");
        assert_eq!(value["verticalAlign"], "middle");
    }

    #[test]
    fn test_bound_ids() {
        let mut b = base("r1");
        b.bound_elements = Some(vec![BoundElement {
            kind: "text".to_string(),
            id: "t1".to_string(),
        }]);
        let rect = RectangleElement { base: b };
        assert_eq!(rect.bound_ids().collect::<Vec<_>>(), vec!["t1"]);
    }

    #[test]
    fn test_element_deserializes() {
        let rect = Element::Rectangle(RectangleElement { base: base("r1") });
        let json = serde_json::to_string(&rect).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), "r1");
        assert!(back.as_rectangle().is_some());
    }
}
