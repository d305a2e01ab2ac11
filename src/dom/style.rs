//! Style resolution.
//!
//! Rules only ever see a [`ResolvedStyle`]. Where it comes from depends on the
//! input: a browser capture carries used/computed styles per element
//! ([`SnapshotStyles`]); static HTML only has `style="..."` attributes, which
//! [`InlineStyles`] resolves with CSS inheritance and browser defaults.

use super::{Document, NodeId};
use crate::types::ComputedStyle;

const DEFAULT_COLOR: &str = "rgb(0, 0, 0)";
const DEFAULT_BACKGROUND: &str = "rgba(0, 0, 0, 0)";
const DEFAULT_FONT_SIZE_PX: f64 = 16.0;
const DEFAULT_FONT_WEIGHT: &str = "400";

/// The subset of computed style the rules read.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
    pub color: String,
    pub background_color: String,
    pub font_size_px: f64,
    pub font_weight: String,
    pub position: String,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            display: "inline".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
            color: DEFAULT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            position: "static".to_string(),
        }
    }
}

impl ResolvedStyle {
    /// Not `display: none`, not `visibility: hidden`, not fully transparent.
    pub fn is_visible(&self) -> bool {
        self.display != "none" && self.visibility != "hidden" && self.opacity != 0.0
    }
}

/// Resolves the style of an element.
pub trait StyleResolver {
    /// `None` when no style information exists for the node.
    fn resolve(&self, doc: &Document, node: NodeId) -> Option<ResolvedStyle>;
}

/// Styles captured by the browser alongside the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotStyles;

impl StyleResolver for SnapshotStyles {
    fn resolve(&self, doc: &Document, node: NodeId) -> Option<ResolvedStyle> {
        doc.computed_style(node).map(from_computed)
    }
}

fn from_computed(style: &ComputedStyle) -> ResolvedStyle {
    let defaults = ResolvedStyle::default();
    ResolvedStyle {
        display: style.display.clone().unwrap_or(defaults.display),
        visibility: style.visibility.clone().unwrap_or(defaults.visibility),
        opacity: style.opacity.unwrap_or(defaults.opacity),
        color: style.color.clone().unwrap_or(defaults.color),
        background_color: style
            .background_color
            .clone()
            .unwrap_or(defaults.background_color),
        font_size_px: style.font_size.unwrap_or(defaults.font_size_px),
        font_weight: style.font_weight.clone().unwrap_or(defaults.font_weight),
        position: style.position.clone().unwrap_or(defaults.position),
    }
}

/// Inline `style` attributes with inheritance of `color`, `font-size`,
/// `font-weight` and `visibility`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyles;

impl StyleResolver for InlineStyles {
    fn resolve(&self, doc: &Document, node: NodeId) -> Option<ResolvedStyle> {
        if !doc.is_element(node) {
            return None;
        }

        // Root first so that inherited values flow down.
        let mut chain: Vec<NodeId> = doc.ancestors(node).collect();
        chain.reverse();
        chain.push(node);

        let mut inherited = ResolvedStyle::default();
        let mut own = ResolvedStyle::default();
        for (depth, &id) in chain.iter().enumerate() {
            let is_target = depth + 1 == chain.len();
            own = ResolvedStyle {
                color: inherited.color.clone(),
                font_size_px: inherited.font_size_px,
                font_weight: inherited.font_weight.clone(),
                visibility: inherited.visibility.clone(),
                ..ResolvedStyle::default()
            };
            if let Some(style) = doc.attr(id, "style") {
                for (property, value) in declarations(style) {
                    apply_declaration(&mut own, &property, &value, inherited.font_size_px);
                }
            }
            if !is_target {
                inherited = own.clone();
            }
        }
        Some(own)
    }
}

/// Picks captured styles when the document has any, inline styles otherwise.
pub fn style_resolver_for(doc: &Document) -> Box<dyn StyleResolver> {
    if doc.has_computed_styles() {
        Box::new(SnapshotStyles)
    } else {
        Box::new(InlineStyles)
    }
}

fn declarations(style: &str) -> impl Iterator<Item = (String, String)> + '_ {
    style.split(';').filter_map(|decl| {
        let (property, value) = decl.split_once(':')?;
        let property = property.trim().to_ascii_lowercase();
        let value = value
            .trim()
            .trim_end_matches("!important")
            .trim()
            .to_string();
        if property.is_empty() || value.is_empty() {
            None
        } else {
            Some((property, value))
        }
    })
}

fn apply_declaration(style: &mut ResolvedStyle, property: &str, value: &str, parent_font_px: f64) {
    let lower = value.to_ascii_lowercase();
    match property {
        "color" => style.color = lower,
        "background-color" | "background" => style.background_color = lower,
        "display" => style.display = lower,
        "visibility" => style.visibility = lower,
        "position" => style.position = lower,
        "opacity" => {
            if let Ok(opacity) = lower.parse::<f64>() {
                style.opacity = opacity.clamp(0.0, 1.0);
            }
        }
        "font-size" => {
            if let Some(px) = parse_font_size(&lower, parent_font_px) {
                style.font_size_px = px;
            }
        }
        "font-weight" => {
            style.font_weight = match lower.as_str() {
                "normal" => DEFAULT_FONT_WEIGHT.to_string(),
                _ => lower,
            }
        }
        _ => {}
    }
}

/// Converts a CSS font-size to pixels. Relative units resolve against the
/// parent size (`em`, `%`) or the 16px root default (`rem`).
pub(crate) fn parse_font_size(value: &str, parent_px: f64) -> Option<f64> {
    let value = value.trim();
    let (number, factor) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("pt") {
        (n, 96.0 / 72.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, DEFAULT_FONT_SIZE_PX)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, parent_px)
    } else if let Some(n) = value.strip_suffix('%') {
        (n, parent_px / 100.0)
    } else {
        (value, 1.0)
    };
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n * factor)
}
