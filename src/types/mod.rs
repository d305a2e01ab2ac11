//! Core data types shared by the capture, audit and output layers.
//!
//! - [`dom`] - DOM snapshot wire format
//! - [`report`] - Audit categories, issues and per-category results

pub mod dom;
pub mod report;

pub use dom::{BoundingBox, ComputedStyle, DomNode, DomSnapshot, TEXT_NODE_TAG};
pub use report::{AuditReport, Category, CategoryResult, Issue, IssueDetail, Severity};
