use super::{normalize_whitespace, AuditContext, Rule};
use crate::dom::{Document, NodeId};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Checks the page's H1 count, level skips between consecutive headings and
/// empty headings.
///
/// `total` counts checks rather than elements: one page-structure check plus
/// a level check and an emptiness check per heading.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingsRule;

fn heading_level(doc: &Document, node: NodeId) -> Option<u8> {
    let tag = doc.tag(node)?;
    let digit = tag.strip_prefix('h')?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

impl Rule for HeadingsRule {
    fn category(&self) -> Category {
        Category::Headings
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let headings: Vec<(NodeId, u8)> = doc
            .elements_by_tag(&HEADING_TAGS)
            .filter_map(|id| heading_level(doc, id).map(|level| (id, level)))
            .collect();
        let mut issues = Vec::new();

        let h1_count = headings.iter().filter(|(_, level)| *level == 1).count();
        if h1_count == 0 {
            issues.push(Issue::new(
                "Page",
                "Missing H1 heading",
                "Every page needs one H1 describing its main topic.",
                Severity::High,
                IssueDetail::HeadingStructure { h1_count },
            ));
        } else if h1_count > 1 {
            issues.push(Issue::new(
                "Page",
                format!("Multiple H1 headings ({})", h1_count),
                "A single H1 lets screen reader users identify the main topic.",
                Severity::Medium,
                IssueDetail::HeadingStructure { h1_count },
            ));
        }

        let mut previous: Option<u8> = None;
        for &(node, level) in &headings {
            let text = normalize_whitespace(&doc.text_content(node));
            let element = format!("H{} heading", level);

            if let Some(prev) = previous.filter(|&prev| level > prev + 1) {
                let finding = Issue::new(
                    element.clone(),
                    format!("Heading level skipped (H{} → H{})", prev, level),
                    "Skipped levels break the outline screen reader users navigate by.",
                    Severity::Medium,
                    IssueDetail::Heading {
                        level,
                        text: text.clone(),
                        previous_level: Some(prev),
                    },
                );
                issues.push(ctx.locate(finding, node));
            }

            if text.is_empty() {
                let finding = Issue::new(
                    element,
                    "Empty heading",
                    "Empty headings are announced without content.",
                    Severity::High,
                    IssueDetail::Heading {
                        level,
                        text: String::new(),
                        previous_level: None,
                    },
                );
                issues.push(ctx.locate(finding, node));
            }

            previous = Some(level);
        }

        CategoryResult::new(1 + 2 * headings.len(), issues)
    }
}
