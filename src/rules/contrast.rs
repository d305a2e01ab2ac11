//! Text contrast against the element's own background.
//!
//! Only solid, fully opaque backgrounds are evaluated. Transparent and
//! semi-transparent backgrounds are skipped rather than composited with
//! their ancestors, and so are colors the parser does not understand.

use tracing::trace;

use super::{normalize_whitespace, AuditContext, Rule};
use crate::color::{contrast_ratio_rgb, is_large_text, minimum_contrast_ratio, parse_color};
use crate::dom::{NodeId, ResolvedStyle};
use crate::types::{Category, CategoryResult, Issue, IssueDetail, Severity};

const TEXT_TAGS: [&str; 14] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "button", "span", "li", "td", "th", "label",
];
const INTERACTIVE_TAGS: [&str; 3] = ["a", "button", "label"];
const TEXT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContrastRule;

struct Candidate {
    node: NodeId,
    style: ResolvedStyle,
    text: String,
}

struct Failure {
    node: NodeId,
    tag: String,
    text: String,
    ratio: f64,
    required: f64,
    style: ResolvedStyle,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `16px`, `14.4px`, `18.67px`: at most two decimals, trailing zeros dropped.
fn format_px(px: f64) -> String {
    let fixed = format!("{px:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        return "0px".to_string();
    }
    format!("{trimmed}px")
}

fn preview(text: &str) -> String {
    let text = normalize_whitespace(text);
    match text.char_indices().nth(TEXT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

impl ContrastRule {
    /// Visible text elements, interactive ones first, each group in document
    /// order, truncated to the configured cap.
    fn candidates(&self, ctx: &AuditContext<'_>) -> Vec<Candidate> {
        let doc = ctx.doc;
        let mut interactive = Vec::new();
        let mut other = Vec::new();

        for node in doc.elements_by_tag(&TEXT_TAGS) {
            let Some(style) = ctx.styles.resolve(doc, node) else {
                continue;
            };
            if !style.is_visible() {
                continue;
            }
            let is_interactive = doc
                .tag(node)
                .map(|t| INTERACTIVE_TAGS.contains(&t))
                .unwrap_or(false);
            if is_interactive {
                let text = doc.text_content(node);
                if !text.trim().is_empty() {
                    interactive.push(Candidate { node, style, text });
                }
            } else if doc.has_direct_text(node) {
                let text = doc.direct_text(node);
                other.push(Candidate { node, style, text });
            }
        }

        interactive
            .into_iter()
            .chain(other)
            .take(ctx.options.contrast_max_elements)
            .collect()
    }
}

impl Rule for ContrastRule {
    fn category(&self) -> Category {
        Category::Contrast
    }

    fn evaluate(&self, ctx: &mut AuditContext<'_>) -> CategoryResult {
        let doc = ctx.doc;
        let mut evaluated = 0usize;
        let mut failures: Vec<Failure> = Vec::new();

        for candidate in self.candidates(ctx) {
            let style = candidate.style;
            let background = match parse_color(&style.background_color) {
                Some(bg) if bg.is_opaque() => bg,
                _ => {
                    trace!(
                        node = candidate.node.index(),
                        background = %style.background_color,
                        "skipping element without an opaque background"
                    );
                    continue;
                }
            };
            let Some(foreground) = parse_color(&style.color) else {
                trace!(node = candidate.node.index(), color = %style.color, "skipping unparseable text color");
                continue;
            };

            evaluated += 1;
            let ratio = contrast_ratio_rgb(foreground, background);
            let required = minimum_contrast_ratio(is_large_text(style.font_size_px, &style.font_weight));
            if ratio < required {
                failures.push(Failure {
                    node: candidate.node,
                    tag: doc.tag(candidate.node).unwrap_or_default().to_string(),
                    text: preview(&candidate.text),
                    ratio: round2(ratio),
                    required,
                    style,
                });
            }
        }

        failures.sort_by_key(|f| f.node);
        let mut issues = Vec::with_capacity(failures.len());
        for (i, failure) in failures.into_iter().enumerate() {
            let finding = Issue::new(
                format!("Text {} <{}>", i + 1, failure.tag),
                format!(
                    "Insufficient contrast ({:.2}:1, requires {}:1)",
                    failure.ratio, failure.required
                ),
                "Low-vision users may not be able to read this text.",
                Severity::High,
                IssueDetail::Contrast {
                    text: failure.text,
                    ratio: failure.ratio,
                    required: failure.required,
                    fg_color: failure.style.color,
                    bg_color: failure.style.background_color,
                    font_size: format_px(failure.style.font_size_px),
                },
            );
            issues.push(ctx.locate(finding, failure.node));
        }

        CategoryResult::new(evaluated, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tests::{evaluate_html, evaluate_html_with};
    use crate::rules::AuditOptions;

    #[test]
    fn black_on_white_passes() {
        let result = evaluate_html(
            &ContrastRule,
            r#"<p style="color: rgb(0,0,0); background-color: rgb(255,255,255); font-size: 16px">Readable</p>"#,
        );
        assert_eq!(result.total, 1);
        assert!(result.is_clean());
    }

    #[test]
    fn grey_on_grey_fails_with_details() {
        let result = evaluate_html(
            &ContrastRule,
            r#"<p style="color: rgb(150, 150, 150); background-color: rgb(200, 200, 200)">Faint</p>"#,
        );
        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.severity, Severity::High);
        match &issue.detail {
            IssueDetail::Contrast {
                text,
                ratio,
                required,
                fg_color,
                bg_color,
                font_size,
            } => {
                assert_eq!(text, "Faint");
                assert!(*ratio > 1.5 && *ratio < 2.0);
                assert_eq!(*required, 4.5);
                assert_eq!(fg_color, "rgb(150, 150, 150)");
                assert_eq!(bg_color, "rgb(200, 200, 200)");
                assert_eq!(font_size, "16px");
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn large_text_uses_lower_minimum() {
        // #777 on white is ~4.48: fails at 16px, passes at 24px.
        let result = evaluate_html(
            &ContrastRule,
            r#"
            <p style="color:#777777;background-color:#ffffff">small</p>
            <p style="color:#777777;background-color:#ffffff;font-size:24px">large</p>
            <p style="color:#777777;background-color:#ffffff;font-size:19px;font-weight:bold">bold</p>
            "#,
        );
        assert_eq!(result.total, 3);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(
            result.issues[0].detail,
            IssueDetail::Contrast {
                text: "small".into(),
                ratio: 4.48,
                required: 4.5,
                fg_color: "#777777".into(),
                bg_color: "#ffffff".into(),
                font_size: "16px".into(),
            }
        );
    }

    #[test]
    fn font_sizes_render_with_trimmed_decimals() {
        assert_eq!(format_px(16.0), "16px");
        assert_eq!(format_px(14.4), "14.4px");
        assert_eq!(format_px(18.666_666), "18.67px");
        assert_eq!(format_px(0.0), "0px");
    }

    #[test]
    fn transparent_and_unparseable_backgrounds_are_skipped() {
        let result = evaluate_html(
            &ContrastRule,
            r#"
            <p style="color:#eee">default transparent background</p>
            <p style="color:#eee;background-color:rgba(255,255,255,0.5)">semi</p>
            <p style="color:#eee;background-color:hsl(0,0%,100%)">hsl</p>
            <p style="color:currentColor;background-color:#fff">fg</p>
            "#,
        );
        assert_eq!(result, CategoryResult::new(0, vec![]));
    }

    #[test]
    fn hidden_and_textless_elements_are_not_candidates() {
        let result = evaluate_html(
            &ContrastRule,
            r#"
            <p style="display:none;color:#eee;background-color:#fff">a</p>
            <p style="opacity:0;color:#eee;background-color:#fff">b</p>
            <div style="visibility:hidden"><span style="color:#eee;background-color:#fff">c</span></div>
            <p style="color:#eee;background-color:#fff">   </p>
            <a style="color:#eee;background-color:#fff"><b>nested</b></a>
            <span style="color:#eee;background-color:#fff"><b>only nested</b></span>
            "#,
        );
        // Only the link qualifies: interactive elements may take text from
        // descendants, others need direct text.
        assert_eq!(result.total, 1);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].element.ends_with("<a>"));
    }

    #[test]
    fn cap_prefers_interactive_elements_and_keeps_document_order() {
        let options = AuditOptions {
            contrast_max_elements: 2,
            ..AuditOptions::default()
        };
        let result = evaluate_html_with(
            &ContrastRule,
            r#"
            <p id="p1" style="color:#eee;background-color:#fff">one</p>
            <p id="p2" style="color:#eee;background-color:#fff">two</p>
            <button id="b" style="color:#eee;background-color:#fff">go</button>
            "#,
            &options,
        );
        assert_eq!(result.total, 2);
        let snippets: Vec<&str> = result
            .issues
            .iter()
            .filter_map(|i| i.snippet.as_deref())
            .collect();
        assert_eq!(snippets.len(), 2);
        assert!(snippets[0].starts_with("<p id=\"p1\""));
        assert!(snippets[1].starts_with("<button id=\"b\""));
    }
}
