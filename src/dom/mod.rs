//! Queryable document model used by the audit rules.
//!
//! A [`Document`] is an arena of nodes stored in document (pre-)order and
//! addressed by [`NodeId`]. It is built either from a captured
//! [`DomSnapshot`] or from HTML text, and is never mutated by an audit.
//!
//! # Module Structure
//!
//! - [`walk`] - Explicit-stack traversals (descendants, filtered text nodes)
//! - [`html`] - Static HTML loading
//! - [`style`] - Style resolution (captured computed styles or inline styles)

mod html;
pub mod style;
pub mod walk;

use std::collections::{HashMap, HashSet};

use crate::types::{ComputedStyle, DomSnapshot};

pub use style::{style_resolver_for, InlineStyles, ResolvedStyle, SnapshotStyles, StyleResolver};
pub use walk::{Descendants, TextNodes};

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lower-case tag name
    pub tag: String,
    /// Attributes in a stable order; names are lower-case
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Identifier of the node in the snapshot it was loaded from
    pub source_id: Option<String>,
    pub computed_style: Option<ComputedStyle>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    url: Option<String>,
    title: Option<String>,
}

impl Document {
    /// Loads a captured snapshot. Parentless nodes become roots; child ids
    /// that do not resolve are ignored, and each node is visited at most once.
    pub fn from_snapshot(snapshot: DomSnapshot) -> Self {
        let DomSnapshot { url, title, nodes } = snapshot;
        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let roots: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                n.parent
                    .as_deref()
                    .map(|p| !index.contains_key(p))
                    .unwrap_or(true)
            })
            .map(|(i, _)| i)
            .collect();

        let mut doc = Document {
            nodes: Vec::with_capacity(nodes.len()),
            url,
            title,
        };
        let mut visited: HashSet<usize> = HashSet::with_capacity(nodes.len());
        let mut stack: Vec<(usize, Option<NodeId>)> =
            roots.into_iter().rev().map(|i| (i, None)).collect();

        while let Some((raw_index, parent)) = stack.pop() {
            if !visited.insert(raw_index) {
                continue;
            }
            let raw = &nodes[raw_index];
            let data = if raw.is_text() {
                NodeData::Text(raw.text.clone().unwrap_or_default())
            } else {
                let mut attributes: Vec<(String, String)> = raw
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                    .collect();
                attributes.sort();
                NodeData::Element(ElementData {
                    tag: raw.tag.to_ascii_lowercase(),
                    attributes,
                })
            };
            let id = doc.push(
                data,
                parent,
                Some(raw.id.clone()),
                raw.computed_style.clone(),
            );
            for child in raw.children.iter().rev() {
                if let Some(&child_index) = index.get(child.as_str()) {
                    stack.push((child_index, Some(id)));
                }
            }
        }

        doc
    }

    /// Parses HTML text. The result carries no computed styles.
    pub fn parse_html(source: &str) -> Self {
        html::parse(source)
    }

    pub(crate) fn with_metadata(url: Option<String>, title: Option<String>) -> Self {
        Self {
            nodes: Vec::new(),
            url,
            title,
        }
    }

    /// Appends a node. Callers must push in pre-order so that arena order is
    /// document order.
    pub(crate) fn push(
        &mut self,
        data: NodeData,
        parent: Option<NodeId>,
        source_id: Option<String>,
        computed_style: Option<ComputedStyle>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
            source_id,
            computed_style,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All nodes in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(move |&id| self.is_element(id))
    }

    /// Elements whose tag is one of `tags`, in document order.
    pub fn elements_by_tag<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = NodeId> + 'a {
        self.elements().filter(move |&id| {
            self.tag(id)
                .map(|t| tags.iter().any(|wanted| *wanted == t))
                .unwrap_or(false)
        })
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Element(_))
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    pub fn has_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id) == Some(tag)
    }

    /// Text of a text node; `None` for elements.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(t) => Some(t.as_str()),
            NodeData::Element(_) => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| {
            el.attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Attribute value after trimming, treating empty as absent.
    pub fn non_empty_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attr(id, name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .map(|c| c.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Pre-order descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.text(d))
            .collect()
    }

    /// Concatenated text of the node's own text-node children.
    pub fn direct_text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|&c| self.text(c))
            .collect()
    }

    /// True when any own text-node child has non-whitespace content.
    pub fn has_direct_text(&self, id: NodeId) -> bool {
        self.children(id)
            .iter()
            .filter_map(|&c| self.text(c))
            .any(|t| !t.trim().is_empty())
    }

    /// The root `<html>` element, if present.
    pub fn document_element(&self) -> Option<NodeId> {
        self.elements_by_tag(&["html"]).next()
    }

    /// First element whose attribute `name` equals `value`.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.elements().find(|&id| self.attr(id, name) == Some(value))
    }

    pub fn source_id(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].source_id.as_deref()
    }

    pub fn computed_style(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.nodes[id.0].computed_style.as_ref()
    }

    pub fn has_computed_styles(&self) -> bool {
        self.nodes.iter().any(|n| n.computed_style.is_some())
    }
}
