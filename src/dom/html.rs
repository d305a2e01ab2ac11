//! Static HTML loading.

use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

use super::{Document, ElementData, NodeData, NodeId};

pub(super) fn parse(source: &str) -> Document {
    let root = kuchiki::parse_html().one(source);
    let title = root
        .select_first("head > title")
        .ok()
        .map(|t| t.as_node().text_contents().trim().to_string())
        .filter(|t| !t.is_empty());

    let mut doc = Document::with_metadata(None, title);
    let mut stack: Vec<(NodeRef, Option<NodeId>)> = Vec::new();
    push_children(&mut stack, &root, None);

    while let Some((node, parent)) = stack.pop() {
        match node.data() {
            kuchiki::NodeData::Element(el) => {
                let attributes = el
                    .attributes
                    .borrow()
                    .map
                    .iter()
                    .map(|(k, v)| (k.local.as_ref().to_ascii_lowercase(), v.value.clone()))
                    .collect();
                let id = doc.push(
                    NodeData::Element(ElementData {
                        tag: el.name.local.as_ref().to_ascii_lowercase(),
                        attributes,
                    }),
                    parent,
                    None,
                    None,
                );
                push_children(&mut stack, &node, Some(id));
            }
            kuchiki::NodeData::Text(text) => {
                doc.push(NodeData::Text(text.borrow().clone()), parent, None, None);
            }
            kuchiki::NodeData::Document(_) | kuchiki::NodeData::DocumentFragment => {
                push_children(&mut stack, &node, parent);
            }
            // Comments, doctypes and processing instructions carry no content.
            _ => {}
        }
    }

    doc
}

fn push_children(stack: &mut Vec<(NodeRef, Option<NodeId>)>, node: &NodeRef, parent: Option<NodeId>) {
    let children: Vec<NodeRef> = node.children().collect();
    stack.extend(children.into_iter().rev().map(|c| (c, parent)));
}
