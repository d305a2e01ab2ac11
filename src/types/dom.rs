//! DOM snapshot types for captured pages.
//!
//! These types are the wire format between the capture helper (or a saved
//! JSON file) and the audit engine. The engine never reads them directly; they
//! are loaded into a [`crate::dom::Document`] arena first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tag used for text nodes in a snapshot.
pub const TEXT_NODE_TAG: &str = "#text";

/// A snapshot of a web page's DOM structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    /// The URL of the captured page
    pub url: Option<String>,
    /// The page title
    pub title: Option<String>,
    /// Flattened list of DOM nodes (elements and text nodes)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<DomNode>,
}

/// A single DOM node with its properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    /// Unique identifier for this node within the snapshot
    pub id: String,
    /// Lower-case tag name, or `#text` for text nodes
    pub tag: String,
    /// IDs of child nodes, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// ID of parent node
    #[serde(default)]
    pub parent: Option<String>,
    /// HTML attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
    /// Text content (text nodes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Position and size on screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
    /// CSS computed styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_style: Option<ComputedStyle>,
}

impl DomNode {
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_NODE_TAG
    }
}

/// Rectangle bounds for an element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Computed (used) CSS styles for a DOM element, as reported by the browser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub opacity: Option<f64>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    /// Font size in CSS pixels
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub font_family: Option<String>,
    pub position: Option<String>,
}
