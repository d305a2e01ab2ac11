//! Human-readable views of flagged elements.

use crate::dom::{Document, NodeData, NodeId, TextNodes};
use crate::session::{BADGE_CLASS, MARKER_ATTR_PREFIX};

/// Maximum snippet length in characters, before the ellipsis.
pub const SNIPPET_MAX_CHARS: usize = 500;
const ELLIPSIS: &str = "...";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serializes an element's markup without inline styles, marker attributes
/// or badge elements, truncated to [`SNIPPET_MAX_CHARS`].
///
/// Reads the arena only; the document is never modified.
pub fn generate_html_snippet(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    truncate(out)
}

/// Text of a link as announced to assistive technology: every text node under
/// `node` except those inside `svg`, `img` or badge elements, trimmed.
pub fn extract_accessible_link_text(doc: &Document, node: NodeId) -> String {
    let text: String = TextNodes::new(doc, node, is_excluded_from_link_text)
        .filter_map(|id| doc.text(id))
        .collect();
    text.trim().to_string()
}

fn is_excluded_from_link_text(doc: &Document, id: NodeId) -> bool {
    doc.has_tag(id, "svg") || doc.has_tag(id, "img") || is_badge(doc, id)
}

fn is_badge(doc: &Document, id: NodeId) -> bool {
    doc.has_class(id, BADGE_CLASS)
}

fn is_scrubbed_attribute(name: &str) -> bool {
    name == "style" || name.starts_with(MARKER_ATTR_PREFIX)
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

fn write_node(doc: &Document, root: NodeId, out: &mut String) {
    let mut stack = vec![Step::Open(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => match &doc.node(id).data {
                NodeData::Text(text) => escape_text(text, out),
                NodeData::Element(el) => {
                    if id != root && is_badge(doc, id) {
                        continue;
                    }
                    out.push('<');
                    out.push_str(&el.tag);
                    for (name, value) in &el.attributes {
                        if is_scrubbed_attribute(name) {
                            continue;
                        }
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        escape_attribute(value, out);
                        out.push('"');
                    }
                    out.push('>');
                    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                        continue;
                    }
                    stack.push(Step::Close(id));
                    stack.extend(doc.children(id).iter().rev().map(|&c| Step::Open(c)));
                }
            },
            Step::Close(id) => {
                if let Some(tag) = doc.tag(id) {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        }
        // Stop early once the output is long enough to be truncated anyway.
        if out.chars().count() > SNIPPET_MAX_CHARS {
            break;
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

fn truncate(snippet: String) -> String {
    match snippet.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &snippet[..cut], ELLIPSIS),
        None => snippet,
    }
}
