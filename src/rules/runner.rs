use tracing::debug;

use super::{
    AuditContext, AuditOptions, ButtonsRule, ContrastRule, FormsRule, HeadingsRule, ImagesRule,
    LandmarksRule, LanguageRule, LinksRule, Rule, SvgRule,
};
use crate::dom::{style_resolver_for, Document, StyleResolver};
use crate::session::{HandleArena, ScanSession};
use crate::types::{AuditReport, CategoryResult};

/// The nine detectors in report order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::<ImagesRule>::default(),
        Box::<SvgRule>::default(),
        Box::<LinksRule>::default(),
        Box::<HeadingsRule>::default(),
        Box::<FormsRule>::default(),
        Box::<ContrastRule>::default(),
        Box::<LanguageRule>::default(),
        Box::<LandmarksRule>::default(),
        Box::<ButtonsRule>::default(),
    ]
}

/// Runs a set of rules over a document.
pub struct Auditor {
    options: AuditOptions,
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(AuditOptions::default())
    }
}

impl Auditor {
    pub fn new(options: AuditOptions) -> Self {
        Self::with_rules(options, default_rules())
    }

    pub fn with_rules(options: AuditOptions, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { options, rules }
    }

    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// One synchronous pass. Every category key is present in the report;
    /// categories without a rule (including `colorblind`) stay empty.
    pub fn run(&self, doc: &Document, styles: &dyn StyleResolver) -> ScanSession {
        let mut report = AuditReport::default();
        let mut handles = HandleArena::new();

        for rule in &self.rules {
            let category = rule.category();
            let mut ctx = AuditContext::new(doc, styles, &self.options, category, &mut handles);
            let result = rule.evaluate(&mut ctx);
            debug!(
                category = %category,
                total = result.total,
                issues = result.issues.len(),
                "rule evaluated"
            );
            report.insert(category, result);
        }
        report.colorblind = CategoryResult::empty();

        debug!(
            issues = report.issue_count(),
            handles = handles.len(),
            "audit complete"
        );
        ScanSession::new(report, handles)
    }
}

/// Audits `doc` with the default rules, options and style source.
pub fn run_audit(doc: &Document) -> ScanSession {
    let styles = style_resolver_for(doc);
    Auditor::default().run(doc, styles.as_ref())
}
