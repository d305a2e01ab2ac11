use super::svg::is_accessible_svg;
use super::{normalize_whitespace, AuditContext, Rule};
use crate::dom::{Document, NodeId};
use crate::snippet::extract_accessible_link_text;
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

/// Flags links without an accessible description, and links whose only
/// description is a generic phrase such as "cliquez ici".
#[derive(Debug, Clone, Copy, Default)]
pub struct LinksRule;

fn has_labelled_image(doc: &Document, link: NodeId) -> bool {
    doc.descendants(link)
        .any(|d| doc.has_tag(d, "img") && doc.non_empty_attr(d, "alt").is_some())
}

fn has_accessible_svg(doc: &Document, link: NodeId) -> bool {
    doc.descendants(link)
        .any(|d| doc.has_tag(d, "svg") && is_accessible_svg(doc, d))
}

impl Rule for LinksRule {
    fn category(&self) -> Category {
        Category::Links
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let phrases: Vec<String> = ctx
            .options
            .non_descriptive_links
            .iter()
            .map(|p| normalize_whitespace(p).to_lowercase())
            .collect();
        let links: Vec<_> = doc.elements_by_tag(&["a"]).collect();
        let mut issues = Vec::new();

        for (i, &link) in links.iter().enumerate() {
            if doc.non_empty_attr(link, "aria-label").is_some() {
                continue;
            }
            let text = normalize_whitespace(&extract_accessible_link_text(doc, link));
            let detail = IssueDetail::Link {
                href: doc.attr(link, "href").unwrap_or_default().to_string(),
                text: text.clone(),
            };
            let element = format!("Link {}", i + 1);

            let finding = if text.is_empty() {
                if has_labelled_image(doc, link) || has_accessible_svg(doc, link) {
                    continue;
                }
                Issue::new(
                    element,
                    "Link has no accessible description",
                    "Screen readers announce this link without saying where it goes.",
                    Severity::High,
                    detail,
                )
            } else if phrases.contains(&text.to_lowercase()) {
                Issue::new(
                    element,
                    "Non-descriptive link text",
                    format!("\"{}\" does not describe the link destination out of context.", text),
                    Severity::Medium,
                    detail,
                )
            } else {
                continue;
            };
            issues.push(ctx.locate(finding, link));
        }

        CategoryResult::new(links.len(), issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{evaluate_html, evaluate_html_with};
    use crate::rules::AuditOptions;

    #[test]
    fn generic_phrase_is_medium() {
        let result = evaluate_html(&LinksRule, r##"<a href="#">Cliquez ici</a>"##);
        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.severity, Severity::Medium);
        assert_eq!(issue.issue, "Non-descriptive link text");
        assert_eq!(
            issue.detail,
            IssueDetail::Link {
                href: "#".into(),
                text: "Cliquez ici".into()
            }
        );
    }

    #[test]
    fn empty_link_is_high() {
        let result = evaluate_html(&LinksRule, r##"<a href="#"></a>"##);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(result.issues[0].issue, "Link has no accessible description");
    }

    #[test]
    fn aria_label_satisfies_both_checks() {
        let result = evaluate_html(
            &LinksRule,
            r#"<a aria-label="Télécharger le PDF"></a><a href="/a" aria-label="Article">voir</a>"#,
        );
        assert_eq!(result.total, 2);
        assert!(result.is_clean());
    }

    #[test]
    fn images_and_titled_graphics_describe_links() {
        let result = evaluate_html(
            &LinksRule,
            r#"
            <a href="/home"><img src="h.png" alt="Home"></a>
            <a href="/gh"><svg role="img" aria-label="GitHub"></svg></a>
            <a href="/x"><img src="x.png" alt=""></a>
            <a href="/y"><svg><path></path></svg></a>
            "#,
        );
        assert_eq!(result.total, 4);
        let flagged: Vec<&str> = result.issues.iter().map(|i| i.element.as_str()).collect();
        assert_eq!(flagged, vec!["Link 3", "Link 4"]);
    }

    #[test]
    fn svg_title_text_does_not_count_as_link_text() {
        let result = evaluate_html(
            &LinksRule,
            r#"<a href="/s"><svg><title>voir</title></svg></a>"#,
        );
        // The titled graphic is accessible, and its title is not matched
        // against the phrase list.
        assert!(result.is_clean());
    }

    #[test]
    fn descriptive_text_passes_and_whitespace_is_normalized() {
        let result = evaluate_html(
            &LinksRule,
            "<a href=\"/docs\">Read the installation guide</a><a href=\"/m\">  Lire\n  la suite </a>",
        );
        assert_eq!(result.passed, 1);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::Medium);
    }

    #[test]
    fn phrase_list_is_configurable() {
        let options = AuditOptions {
            non_descriptive_links: vec!["Click here".into()],
            ..AuditOptions::default()
        };
        let result = evaluate_html_with(
            &LinksRule,
            r#"<a href="/a">click HERE</a><a href="/b">voir</a>"#,
            &options,
        );
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].element, "Link 1");
    }
}
