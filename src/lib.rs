//! Accessibility Checker (a11yc) Library
//!
//! Scans a web document for common WCAG 2.1 problems and reports them per
//! category with a severity, an explanation and an HTML snippet of the
//! offending element. Documents come from a live page (captured with
//! Playwright), a saved DOM snapshot, or a static HTML file.
//!
//! # Module Overview
//!
//! - [`browser`] - Headless browser capture for live URLs
//! - [`dom`] - Read-only document arena, traversal and style resolution
//! - [`color`] - CSS color parsing, luminance and contrast ratios
//! - [`rules`] - The rule detectors and the audit runner
//! - [`session`] - Element handles and badge marking plans for a scan
//! - [`snippet`] - HTML snippets and accessible link text
//! - [`summary`] - Filtering, scoring and top-issue ranking
//! - [`config`] - Configuration file support
//! - [`types`] - Snapshot wire format and report types
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```
//! use a11yc_lib::{run_audit, Category, Document};
//!
//! let doc = Document::parse_html(r#"<html><body><img src="logo.png"></body></html>"#);
//! let session = run_audit(&doc);
//! let images = session.report.get(Category::Images);
//! assert_eq!(images.issues[0].issue, "Missing alt text");
//! ```

pub mod browser;
pub mod color;
pub mod config;
pub mod dom;
pub mod error;
pub mod output;
pub mod resource;
pub mod rules;
pub mod session;
pub mod snippet;
pub mod summary;
pub mod types;
pub mod viewport;

pub use browser::{
    capture_snapshot, CaptureOptions, ProgressCallback, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_NETWORK_IDLE_TIMEOUT, DEFAULT_PROCESS_TIMEOUT,
};
pub use color::{contrast_ratio, is_large_text, parse_color, relative_luminance, RgbaColor};
pub use config::Config;
pub use dom::{style_resolver_for, Document, NodeId, StyleResolver};
pub use error::{A11yError, Result};
pub use output::{
    A11yOutput, AuditOutput, CaptureOutput, ErrorOutput, InputDescriptor, Summary,
    A11YC_OUTPUT_VERSION,
};
pub use resource::{load_document, parse_input, InputKind, ParsedInput};
pub use rules::{default_rules, run_audit, AuditContext, AuditOptions, Auditor, Rule};
pub use session::{ElementHandle, ScanSession};
pub use snippet::{extract_accessible_link_text, generate_html_snippet};
pub use summary::{accessibility_score, generate_top_issues, severity_counts, ReportFilter};
pub use types::{AuditReport, Category, CategoryResult, DomSnapshot, Issue, IssueDetail, Severity};
pub use viewport::Viewport;
