use crate::error::ErrorPayload;
use crate::resource::{InputKind, ParsedInput};
use crate::summary::SeverityCounts;
use crate::types::{AuditReport, Severity};
use crate::Viewport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema version for output payloads.
pub const A11YC_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum A11yOutput {
    Audit(AuditOutput),
    Capture(CaptureOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub kind: InputKind,
    pub value: String,
}

impl From<&ParsedInput> for InputDescriptor {
    fn from(input: &ParsedInput) -> Self {
        Self {
            kind: input.kind,
            value: input.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditOutput {
    pub version: String,
    pub input: InputDescriptor,
    /// Only set for live captures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    /// Share of passed checks, in `[0, 1]`.
    pub score: f32,
    /// False when an issue at or above `fail_on` was found.
    pub passed: bool,
    pub fail_on: Severity,
    pub counts: SeverityCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub report: AuditReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOutput {
    pub version: String,
    pub url: String,
    pub viewport: Viewport,
    pub node_count: usize,
    /// Where the snapshot was written; the snapshot is inlined when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<crate::types::DomSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::types::{Category, CategoryResult, Issue, IssueDetail};

    #[test]
    fn audit_output_serializes() {
        let mut report = AuditReport::default();
        report.insert(
            Category::Images,
            CategoryResult::new(
                2,
                vec![Issue::new(
                    "Image 1",
                    "Missing alt text",
                    "Screen readers cannot describe this image",
                    Severity::High,
                    IssueDetail::Image {
                        src: "logo.png".into(),
                    },
                )],
            ),
        );
        let output = A11yOutput::Audit(AuditOutput {
            version: A11YC_OUTPUT_VERSION.to_string(),
            input: InputDescriptor {
                kind: InputKind::Html,
                value: "page.html".into(),
            },
            viewport: None,
            score: 0.5,
            passed: false,
            fail_on: Severity::High,
            counts: SeverityCounts {
                high: 1,
                medium: 0,
                low: 0,
            },
            summary: Some(Summary {
                top_issues: vec!["[images] Missing alt text".into()],
            }),
            report,
        });

        let json = serde_json::to_string(&output).expect("serialize audit output");
        assert!(json.contains("\"mode\":\"audit\""));
        assert!(json.contains("\"failOn\":\"high\""));
        assert!(json.contains("\"kind\":\"html\""));
        assert!(json.contains("\"images\":{\"total\":2"));
        assert!(!json.contains("\"viewport\""));
    }

    #[test]
    fn capture_output_serializes() {
        let output = A11yOutput::Capture(CaptureOutput {
            version: A11YC_OUTPUT_VERSION.to_string(),
            url: "https://example.com".into(),
            viewport: Viewport::default(),
            node_count: 12,
            snapshot_path: Some(PathBuf::from("snap.json")),
            snapshot: None,
        });
        let json = serde_json::to_string(&output).expect("serialize capture output");
        assert!(json.contains("\"mode\":\"capture\""));
        assert!(json.contains("\"nodeCount\":12"));
        assert!(json.contains("\"snapshotPath\":\"snap.json\""));
        assert!(!json.contains("\"snapshot\":"));
    }

    #[test]
    fn error_output_round_trips_category() {
        let output = A11yOutput::Error(ErrorOutput {
            version: A11YC_OUTPUT_VERSION.to_string(),
            message: None,
            error: ErrorPayload::new(ErrorCategory::Input, "nope".into(), "fix it"),
        });
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"input\""));
        let back: A11yOutput = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, A11yOutput::Error(e) if e.error.message == "nope"));
    }
}
