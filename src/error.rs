use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum A11yError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl A11yError {
    pub fn capture(message: impl Into<String>) -> Self {
        A11yError::Capture(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        A11yError::Input(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            A11yError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            A11yError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Verify URL/format (e.g., https://example.com).",
            ),
            A11yError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the snapshot file is JSON produced by `a11yc capture`.",
            ),
            A11yError::Capture(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("playwright npm package is missing") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Install Playwright (e.g., `npm install playwright` and `npx playwright install chromium`).",
                    )
                } else if lower.contains("chromium executable") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Run `npx playwright install chromium` to download the browser.",
                    )
                } else if lower.contains("spawn playwright helper")
                    || lower.contains("node command")
                    || lower.contains("not found on path")
                {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Install Node.js and ensure the node binary is on PATH; rerun after installing Playwright if needed.",
                    )
                } else if lower.contains("timeout") || lower.contains("timed out") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Try increasing --nav-timeout/--network-idle-timeout/--process-timeout or ensure the page loads without blocking.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Re-run with --verbose to see the capture log; audit a saved snapshot with --input snapshot.json to isolate the browser step.",
                    )
                }
            }
            A11yError::Input(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("unsupported file extension") {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "Use a supported input (http(s) URL, .html/.htm page, or .json snapshot) or override type with --input-type.",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "Check the --input value and --input-type override.",
                    )
                }
            }
            A11yError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check flags (e.g., --viewport WIDTHxHEIGHT, --categories images,links) and the config file.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, A11yError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Capture,
    Io,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_payload_includes_playwright_remediation() {
        let err = A11yError::Capture(
            "Playwright npm package is missing; install with `npm install playwright`.".to_string(),
        );
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Capture);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("npm install playwright"),
            "expected remediation to mention npm install playwright, got: {remediation}"
        );
    }

    #[test]
    fn capture_payload_includes_node_install_hint() {
        let err = A11yError::Capture(
            "Unable to spawn Playwright helper; 'node' was not found on PATH".to_string(),
        );
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.to_ascii_lowercase().contains("node"),
            "expected node install/path remediation, got: {remediation}"
        );
    }

    #[test]
    fn capture_payload_includes_timeout_hint() {
        let err = A11yError::Capture("Playwright timed out after 45s".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("--nav-timeout"),
            "expected timeout remediation, got: {remediation}"
        );
    }

    #[test]
    fn input_payload_lists_supported_inputs_for_unsupported_extension() {
        let err = A11yError::Input("Unsupported file extension 'png'.".to_string());
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains(".html") && remediation.contains(".json"),
            "expected remediation to list supported inputs, got: {remediation}"
        );
    }

    #[test]
    fn input_payload_includes_file_not_found_hint() {
        let err = A11yError::Input("Local file not found: page.html".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(remediation.contains("absolute path"));
    }

    #[test]
    fn config_payload_uses_default_remediation() {
        let err = A11yError::Config("Unknown category: colour".to_string());
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Config);
        assert!(payload
            .remediation
            .unwrap_or_default()
            .contains("--categories"));
    }
}
