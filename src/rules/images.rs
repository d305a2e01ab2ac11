use super::{AuditContext, Rule};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

/// Flags `<img>` elements whose `alt` is missing or blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagesRule;

impl Rule for ImagesRule {
    fn category(&self) -> Category {
        Category::Images
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let images: Vec<_> = doc.elements_by_tag(&["img"]).collect();
        let mut issues = Vec::new();

        for (i, &img) in images.iter().enumerate() {
            if doc.non_empty_attr(img, "alt").is_some() {
                continue;
            }
            let issue = if doc.has_attr(img, "alt") {
                "Empty alt text"
            } else {
                "Missing alt text"
            };
            let finding = Issue::new(
                format!("Image {}", i + 1),
                issue,
                "Screen readers cannot describe this image to blind users.",
                Severity::High,
                IssueDetail::Image {
                    src: doc.attr(img, "src").unwrap_or_default().to_string(),
                },
            );
            issues.push(ctx.locate(finding, img));
        }

        CategoryResult::new(images.len(), issues)
    }
}
