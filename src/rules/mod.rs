//! Accessibility rule detectors.
//!
//! Each [`Rule`] walks a read-only [`Document`], resolves styles through a
//! [`StyleResolver`] when it needs them and returns one [`CategoryResult`].
//! Rules never fail: missing elements and unparseable values degrade to
//! "skipped" or "flagged".
//!
//! # Module Structure
//!
//! - [`images`] - `<img>` alt text
//! - [`svg`] - inline `<svg>` accessibility
//! - [`links`] - link descriptions and non-descriptive phrases
//! - [`headings`] - H1 count, level skips, empty headings
//! - [`forms`] - form field labels
//! - [`contrast`] - text/background contrast ratio
//! - [`language`] - `lang` on the root element
//! - [`landmarks`] - main and navigation landmarks
//! - [`buttons`] - button names
//! - [`runner`] - Runs every rule and assembles the [`ScanSession`](crate::session::ScanSession)

pub mod buttons;
pub mod contrast;
pub mod forms;
pub mod headings;
pub mod images;
pub mod landmarks;
pub mod language;
pub mod links;
mod runner;
pub mod svg;


use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId, StyleResolver};
use crate::session::{ElementHandle, HandleArena};
use crate::snippet::generate_html_snippet;
use crate::types::{Category, CategoryResult, Issue};

pub use buttons::ButtonsRule;
pub use contrast::ContrastRule;
pub use forms::FormsRule;
pub use headings::HeadingsRule;
pub use images::ImagesRule;
pub use landmarks::LandmarksRule;
pub use language::LanguageRule;
pub use links::LinksRule;
pub use runner::{default_rules, run_audit, Auditor};
pub use svg::SvgRule;

/// Upper bound on elements the contrast rule evaluates per scan.
pub const DEFAULT_CONTRAST_MAX_ELEMENTS: usize = 500;

/// Link texts that say nothing about the destination.
pub const DEFAULT_NON_DESCRIPTIVE_LINKS: [&str; 4] =
    ["cliquez ici", "en savoir plus", "voir", "lire la suite"];

/// Tunables shared by all rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOptions {
    pub contrast_max_elements: usize,
    /// Matched case-insensitively against the whole link text.
    pub non_descriptive_links: Vec<String>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            contrast_max_elements: DEFAULT_CONTRAST_MAX_ELEMENTS,
            non_descriptive_links: DEFAULT_NON_DESCRIPTIVE_LINKS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// A single category detector.
pub trait Rule {
    fn category(&self) -> Category;
    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult;
}

/// Everything a rule may read, plus the handle table it registers findings in.
pub struct AuditContext<'a> {
    pub doc: &'a Document,
    pub styles: &'a dyn StyleResolver,
    pub options: &'a AuditOptions,
    category: Category,
    handles: &'a mut HandleArena,
}

impl<'a> AuditContext<'a> {
    pub fn new(
        doc: &'a Document,
        styles: &'a dyn StyleResolver,
        options: &'a AuditOptions,
        category: Category,
        handles: &'a mut HandleArena,
    ) -> Self {
        Self {
            doc,
            styles,
            options,
            category,
            handles,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Registers `node` as flagged for the current category.
    pub fn flag(&mut self, node: NodeId) -> ElementHandle {
        self.handles.assign(node, self.category)
    }

    /// Ties an issue to the element it was raised for.
    pub fn locate(&mut self, mut issue: Issue, node: NodeId) -> Issue {
        issue.handle = Some(self.flag(node));
        issue.snippet = Some(generate_html_snippet(self.doc, node));
        issue
    }
}

/// Collapses runs of whitespace and trims.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the space-separated `role` attribute contains `role`.
pub(crate) fn has_role(doc: &Document, node: NodeId, role: &str) -> bool {
    doc.attr(node, "role")
        .map(|r| r.split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case(role)))
        .unwrap_or(false)
}
