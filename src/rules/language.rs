use super::{AuditContext, Rule};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

const EXPLANATION: &str = "Screen readers need the page language to pick the right pronunciation.";

/// Requires a non-blank `lang` on the root `<html>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageRule;

impl Rule for LanguageRule {
    fn category(&self) -> Category {
        Category::Language
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let issues = match doc.document_element() {
            Some(html) if doc.non_empty_attr(html, "lang").is_some() => vec![],
            Some(html) => {
                let finding = Issue::new(
                    "Document",
                    "Missing lang attribute",
                    EXPLANATION,
                    Severity::High,
                    IssueDetail::Language,
                );
                vec![ctx.locate(finding, html)]
            }
            None => vec![Issue::new(
                "Document",
                "Missing root html element",
                EXPLANATION,
                Severity::High,
                IssueDetail::Language,
            )],
        };
        CategoryResult::new(1, issues)
    }
}
