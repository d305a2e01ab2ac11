use std::collections::HashSet;

use super::{AuditContext, Rule};
use crate::dom::{Document, NodeId};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

/// Input types that never need a visible label.
const UNLABELLED_INPUT_TYPES: [&str; 3] = ["hidden", "submit", "button"];

/// Flags form fields with no label association.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormsRule;

fn input_type(doc: &Document, node: NodeId) -> String {
    doc.non_empty_attr(node, "type")
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "text".to_string())
}

/// `(node, type)` for every field the rule considers.
fn form_fields(doc: &Document) -> Vec<(NodeId, String)> {
    doc.elements_by_tag(&["input", "textarea", "select"])
        .filter_map(|id| match doc.tag(id) {
            Some("input") => {
                let kind = input_type(doc, id);
                (!UNLABELLED_INPUT_TYPES.contains(&kind.as_str())).then_some((id, kind))
            }
            Some(tag) => Some((id, tag.to_string())),
            None => None,
        })
        .collect()
}

fn is_labelled(doc: &Document, node: NodeId, label_targets: &HashSet<&str>) -> bool {
    doc.non_empty_attr(node, "id")
        .map(|id| label_targets.contains(id))
        .unwrap_or(false)
        || doc.ancestors(node).any(|a| doc.has_tag(a, "label"))
        || doc.non_empty_attr(node, "aria-label").is_some()
        || doc.non_empty_attr(node, "aria-labelledby").is_some()
}

impl Rule for FormsRule {
    fn category(&self) -> Category {
        Category::Forms
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let label_targets: HashSet<&str> = doc
            .elements_by_tag(&["label"])
            .filter_map(|label| doc.non_empty_attr(label, "for"))
            .collect();
        let fields = form_fields(doc);
        let mut issues = Vec::new();

        for (i, (node, field_type)) in fields.iter().enumerate() {
            if is_labelled(doc, *node, &label_targets) {
                continue;
            }
            let finding = Issue::new(
                format!("Field {}", i + 1),
                "Form field without label",
                "Screen reader users cannot tell what this field expects.",
                Severity::High,
                IssueDetail::FormField {
                    field_type: field_type.clone(),
                    name: doc.non_empty_attr(*node, "name").map(str::to_string),
                },
            );
            issues.push(ctx.locate(finding, *node));
        }

        CategoryResult::new(fields.len(), issues)
    }
}
