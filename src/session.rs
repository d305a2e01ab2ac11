//! Per-scan state handed back to the caller.
//!
//! Every flagged element gets an [`ElementHandle`], an index into the scan's
//! [`HandleArena`]. Handles restart from zero on every run and carry no
//! meaning across scans. The presentation layer uses [`ScanSession::mark_plan`]
//! to decide which elements to annotate and which stale annotations to clear.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};
use crate::types::{AuditReport, Category};

/// Class carried by injected badge elements.
pub const BADGE_CLASS: &str = "a11y-badge";
/// Prefix shared by every injected marker attribute.
pub const MARKER_ATTR_PREFIX: &str = "data-a11y-";
/// Attribute set on flagged elements; its value is the category name.
pub const FLAGGED_ATTR: &str = "data-a11y-flagged";

/// Opaque per-scan element identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(u32);

impl ElementHandle {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HandleEntry {
    node: NodeId,
    category: Category,
}

/// Handle -> element table, filled in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleArena {
    entries: Vec<HandleEntry>,
}

impl HandleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a flagged element and returns its handle.
    pub fn assign(&mut self, node: NodeId, category: Category) -> ElementHandle {
        let handle = ElementHandle(self.entries.len() as u32);
        self.entries.push(HandleEntry { node, category });
        handle
    }

    pub fn resolve(&self, handle: ElementHandle) -> Option<NodeId> {
        self.entries.get(handle.0 as usize).map(|e| e.node)
    }

    pub fn category(&self, handle: ElementHandle) -> Option<Category> {
        self.entries.get(handle.0 as usize).map(|e| e.category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementHandle, NodeId, Category)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementHandle(i as u32), e.node, e.category))
    }
}

/// An element the presentation layer should annotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
    pub handle: ElementHandle,
    pub node: NodeId,
    pub category: Category,
}

/// Annotation changes needed to reflect a scan in the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkPlan {
    /// Flagged elements, first handle per element, in document order.
    pub mark: Vec<Mark>,
    /// Elements carrying a marker from an earlier scan that no longer qualify.
    pub clear: Vec<NodeId>,
}

/// Result of one audit run: the report plus the handle table for its issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSession {
    pub report: AuditReport,
    pub handles: HandleArena,
}

impl ScanSession {
    pub fn new(report: AuditReport, handles: HandleArena) -> Self {
        Self { report, handles }
    }

    pub fn report(&self) -> &AuditReport {
        &self.report
    }

    pub fn into_report(self) -> AuditReport {
        self.report
    }

    pub fn resolve(&self, handle: ElementHandle) -> Option<NodeId> {
        self.handles.resolve(handle)
    }

    /// Snapshot id of the element behind `handle`, when the document came
    /// from a capture.
    pub fn dom_id<'d>(&self, doc: &'d Document, handle: ElementHandle) -> Option<&'d str> {
        self.resolve(handle).and_then(|node| doc.source_id(node))
    }

    /// Handles issued for one category, in detection order.
    pub fn handles_for(&self, category: Category) -> Vec<ElementHandle> {
        self.handles
            .iter()
            .filter(|(_, _, c)| *c == category)
            .map(|(h, _, _)| h)
            .collect()
    }

    pub fn mark_plan(&self, doc: &Document) -> MarkPlan {
        let mut mark: Vec<Mark> = Vec::new();
        let mut seen = vec![false; doc.len()];
        for (handle, node, category) in self.handles.iter() {
            let Some(slot) = seen.get_mut(node.index()) else {
                continue;
            };
            if std::mem::replace(slot, true) {
                continue;
            }
            mark.push(Mark {
                handle,
                node,
                category,
            });
        }
        mark.sort_by_key(|m| m.node);

        let clear = doc
            .elements()
            .filter(|&id| doc.has_attr(id, FLAGGED_ATTR) && !seen[id.index()])
            .collect();

        MarkPlan { mark, clear }
    }
}
