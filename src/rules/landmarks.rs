use super::{has_role, AuditContext, Rule};
use crate::dom::Document;
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

/// Requires a main and a navigation landmark somewhere in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandmarksRule;

struct Landmark {
    name: &'static str,
    tag: &'static str,
    role: &'static str,
    severity: Severity,
    explanation: &'static str,
}

const LANDMARKS: [Landmark; 2] = [
    Landmark {
        name: "main",
        tag: "main",
        role: "main",
        severity: Severity::Medium,
        explanation: "A main landmark lets keyboard and screen reader users skip to the content.",
    },
    Landmark {
        name: "navigation",
        tag: "nav",
        role: "navigation",
        severity: Severity::Low,
        explanation: "A navigation landmark helps users find the site menu.",
    },
];

fn has_landmark(doc: &Document, landmark: &Landmark) -> bool {
    doc.elements()
        .any(|id| doc.has_tag(id, landmark.tag) || has_role(doc, id, landmark.role))
}

impl Rule for LandmarksRule {
    fn category(&self) -> Category {
        Category::Landmarks
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let issues = LANDMARKS
            .iter()
            .filter(|landmark| !has_landmark(ctx.doc, landmark))
            .map(|landmark| {
                Issue::new(
                    "Page",
                    format!("Missing {} landmark", landmark.name),
                    landmark.explanation,
                    landmark.severity,
                    IssueDetail::Landmark {
                        landmark: landmark.name.to_string(),
                    },
                )
            })
            .collect();
        CategoryResult::new(LANDMARKS.len(), issues)
    }
}
