//! Headless browser capture.
//!
//! Renders a page with Playwright via Node.js and returns a [`DomSnapshot`]
//! of every element and text node with its computed style.
//!
//! # Module Structure
//!
//! - [`capture`] - Process control, timeouts and snapshot decoding
//! - [`playwright`] - The helper script, availability checks and error mapping
//!
//! # Example
//!
//! ```no_run
//! use a11yc_lib::{capture_snapshot, run_audit, CaptureOptions, Document};
//!
//! # async fn example() -> a11yc_lib::Result<()> {
//! let snapshot = capture_snapshot("https://example.com", &CaptureOptions::default()).await?;
//! let session = run_audit(&Document::from_snapshot(snapshot));
//! println!("{} issues", session.report.issue_count());
//! # Ok(())
//! # }
//! ```
//!
//! [`DomSnapshot`]: crate::types::DomSnapshot

mod capture;
mod playwright;

pub use capture::{
    capture_snapshot, CaptureOptions, ProgressCallback, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_NETWORK_IDLE_TIMEOUT, DEFAULT_PROCESS_TIMEOUT, MOCK_SNAPSHOT_ENV,
};
