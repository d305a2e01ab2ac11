//! Explicit-stack tree traversals.

use super::{Document, NodeId};

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(doc: &'a Document, root: NodeId) -> Self {
        let stack = doc.children(root).iter().rev().copied().collect();
        Self { doc, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Pre-order iterator over the text nodes under a root, skipping every
/// element subtree for which `skip` returns true. The root itself is never
/// tested against `skip`.
pub struct TextNodes<'a, F> {
    doc: &'a Document,
    stack: Vec<NodeId>,
    skip: F,
}

impl<'a, F> TextNodes<'a, F>
where
    F: Fn(&Document, NodeId) -> bool,
{
    pub fn new(doc: &'a Document, root: NodeId, skip: F) -> Self {
        let stack = doc.children(root).iter().rev().copied().collect();
        Self { doc, stack, skip }
    }
}

impl<F> Iterator for TextNodes<'_, F>
where
    F: Fn(&Document, NodeId) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            if self.doc.text(id).is_some() {
                return Some(id);
            }
            if (self.skip)(self.doc, id) {
                continue;
            }
            self.stack
                .extend(self.doc.children(id).iter().rev().copied());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descendants_are_pre_order() {
        let doc = Document::parse_html("<div id=\"root\"><p>a<i>b</i></p><span>c</span></div>");
        let root = doc.find_by_attr("id", "root").unwrap();
        let tags: Vec<String> = doc
            .descendants(root)
            .map(|id| {
                doc.tag(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("'{}'", doc.text(id).unwrap_or_default()))
            })
            .collect();
        assert_eq!(tags, vec!["p", "'a'", "i", "'b'", "span", "'c'"]);
    }

    #[test]
    fn text_nodes_skip_rejected_subtrees() {
        let doc = Document::parse_html(
            "<a id=\"l\">Read <svg><title>icon</title></svg><em>more <img alt=\"x\"></em>now</a>",
        );
        let link = doc.find_by_attr("id", "l").unwrap();
        let text: String = TextNodes::new(&doc, link, |d, id| d.has_tag(id, "svg"))
            .filter_map(|id| doc.text(id))
            .collect();
        assert_eq!(text, "Read more now");
    }

    #[test]
    fn text_nodes_of_empty_root_yield_nothing() {
        let doc = Document::parse_html("<button id=\"b\"></button>");
        let button = doc.find_by_attr("id", "b").unwrap();
        assert_eq!(TextNodes::new(&doc, button, |_, _| false).count(), 0);
    }
}
