use super::{has_role, AuditContext, Rule};
use crate::dom::{Document, NodeId};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

/// Flags inline `<svg>` graphics that assistive technology can neither
/// announce nor ignore.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRule;

/// `role="img"`, a non-blank `aria-label`, a `<title>` descendant, or
/// `aria-hidden="true"`.
pub fn is_accessible_svg(doc: &Document, svg: NodeId) -> bool {
    has_role(doc, svg, "img")
        || doc.non_empty_attr(svg, "aria-label").is_some()
        || doc.descendants(svg).any(|d| doc.has_tag(d, "title"))
        || doc
            .attr(svg, "aria-hidden")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
}

impl Rule for SvgRule {
    fn category(&self) -> Category {
        Category::Svg
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let graphics: Vec<_> = doc.elements_by_tag(&["svg"]).collect();
        let mut issues = Vec::new();

        for (i, &svg) in graphics.iter().enumerate() {
            if is_accessible_svg(doc, svg) {
                continue;
            }
            let finding = Issue::new(
                format!("SVG {}", i + 1),
                "Inaccessible SVG",
                "Add role=\"img\" with an aria-label or <title>, or aria-hidden=\"true\" if decorative.",
                Severity::High,
                IssueDetail::Svg {
                    role: doc.non_empty_attr(svg, "role").map(str::to_string),
                },
            );
            issues.push(ctx.locate(finding, svg));
        }

        CategoryResult::new(graphics.len(), issues)
    }
}
