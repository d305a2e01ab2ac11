use super::{AuditContext, Rule};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

/// Flags buttons with neither text content nor an `aria-label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonsRule;

impl Rule for ButtonsRule {
    fn category(&self) -> Category {
        Category::Buttons
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let buttons: Vec<_> = doc.elements_by_tag(&["button"]).collect();
        let mut issues = Vec::new();

        for (i, &button) in buttons.iter().enumerate() {
            let named = !doc.text_content(button).trim().is_empty()
                || doc.non_empty_attr(button, "aria-label").is_some();
            if named {
                continue;
            }
            let finding = Issue::new(
                format!("Button {}", i + 1),
                "Button without accessible name",
                "Screen readers announce this control only as \"button\".",
                Severity::High,
                IssueDetail::Button {
                    button_type: doc
                        .non_empty_attr(button, "type")
                        .map(str::to_ascii_lowercase)
                        .unwrap_or_else(|| "submit".to_string()),
                },
            );
            issues.push(ctx.locate(finding, button));
        }

        CategoryResult::new(buttons.len(), issues)
    }
}
