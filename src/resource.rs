use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::browser::{capture_snapshot, CaptureOptions};
use crate::dom::Document;
use crate::error::{A11yError, Result};
use crate::types::DomSnapshot;

/// What an audit input points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// A live page, captured with the headless browser.
    Url,
    /// A JSON snapshot written by `a11yc capture`.
    Snapshot,
    /// A static HTML file. No computed styles are available.
    Html,
}

impl std::str::FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "url" => Ok(InputKind::Url),
            "snapshot" | "json" => Ok(InputKind::Snapshot),
            "html" => Ok(InputKind::Html),
            other => Err(format!(
                "Unknown input type '{}'. Expected one of: url, snapshot, html",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInput {
    pub kind: InputKind,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Supported extensions: {supported}.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },
}

impl From<InputParseError> for A11yError {
    fn from(err: InputParseError) -> Self {
        A11yError::Input(err.to_string())
    }
}

const SNAPSHOT_EXTENSIONS: &[&str] = &["json"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

fn supported_extensions() -> String {
    SNAPSHOT_EXTENSIONS
        .iter()
        .chain(HTML_EXTENSIONS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classifies `value` as a URL or a local snapshot/HTML file.
///
/// With `override_kind` the value is taken as given and only URLs are
/// validated.
pub fn parse_input(
    value: &str,
    override_kind: Option<InputKind>,
) -> std::result::Result<ParsedInput, InputParseError> {
    match override_kind {
        Some(InputKind::Url) => parse_url_input(value),
        Some(kind) => {
            ensure_file(Path::new(value))?;
            Ok(ParsedInput {
                kind,
                value: value.to_string(),
            })
        }
        None if value.starts_with("http://")
            || value.starts_with("https://")
            || value.starts_with("file://") =>
        {
            parse_url_input(value)
        }
        None => parse_local_input(value),
    }
}

fn parse_url_input(value: &str) -> std::result::Result<ParsedInput, InputParseError> {
    Url::parse(value).map_err(|e| InputParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;
    Ok(ParsedInput {
        kind: InputKind::Url,
        value: value.to_string(),
    })
}

fn parse_local_input(value: &str) -> std::result::Result<ParsedInput, InputParseError> {
    let path = Path::new(value);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let kind = if SNAPSHOT_EXTENSIONS.contains(&extension.as_str()) {
        InputKind::Snapshot
    } else if HTML_EXTENSIONS.contains(&extension.as_str()) {
        InputKind::Html
    } else {
        return Err(InputParseError::UnsupportedExtension {
            extension: if extension.is_empty() {
                "no extension".to_string()
            } else {
                extension
            },
            supported: supported_extensions(),
        });
    };

    ensure_file(path)?;
    Ok(ParsedInput {
        kind,
        value: value.to_string(),
    })
}

fn ensure_file(path: &Path) -> std::result::Result<(), InputParseError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(InputParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        }),
    }
}

pub fn read_snapshot(path: &Path) -> Result<DomSnapshot> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Produces the document to audit. URLs go through a browser capture.
pub async fn load_document(input: &ParsedInput, capture: &CaptureOptions) -> Result<Document> {
    let doc = match input.kind {
        InputKind::Url => Document::from_snapshot(capture_snapshot(&input.value, capture).await?),
        InputKind::Snapshot => Document::from_snapshot(read_snapshot(Path::new(&input.value))?),
        InputKind::Html => Document::parse_html(&fs::read_to_string(&input.value)?),
    };
    debug!(kind = ?input.kind, nodes = doc.len(), "document loaded");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file_with_extension(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new()
            .suffix(&format!(".{}", ext))
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn urls_are_classified_without_touching_disk() {
        let res = parse_input("http://localhost:3000/dashboard", None).unwrap();
        assert_eq!(res.kind, InputKind::Url);
        let res = parse_input("file:///tmp/page.html", None).unwrap();
        assert_eq!(res.kind, InputKind::Url);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let res = parse_input("https://", None);
        assert!(matches!(res, Err(InputParseError::InvalidUrl { .. })));
    }

    #[test]
    fn local_files_by_extension() {
        let json = temp_file_with_extension("json", "{}");
        let html = temp_file_with_extension("HTM", "<p>hi</p>");
        assert_eq!(
            parse_input(json.path().to_str().unwrap(), None).unwrap().kind,
            InputKind::Snapshot
        );
        assert_eq!(
            parse_input(html.path().to_str().unwrap(), None).unwrap().kind,
            InputKind::Html
        );
    }

    #[test]
    fn unsupported_extension_lists_supported_ones() {
        let file = temp_file_with_extension("png", "");
        let err = parse_input(file.path().to_str().unwrap(), None).unwrap_err();
        assert!(matches!(
            &err,
            InputParseError::UnsupportedExtension { extension, .. } if extension == "png"
        ));
        assert!(err.to_string().contains("json, html, htm"));

        let err = parse_input("README", None).unwrap_err();
        assert!(err.to_string().contains("'no extension'"));
    }

    #[test]
    fn missing_file_errors() {
        let res = parse_input("/tmp/does-not-exist-a11yc.html", None);
        assert!(matches!(res, Err(InputParseError::FileNotFound { .. })));
        let err: A11yError = res.unwrap_err().into();
        assert!(matches!(err, A11yError::Input(_)));
    }

    #[test]
    fn override_kind_skips_extension_check() {
        let file = temp_file_with_extension("txt", "<html></html>");
        let res = parse_input(file.path().to_str().unwrap(), Some(InputKind::Html)).unwrap();
        assert_eq!(res.kind, InputKind::Html);
        assert_eq!("JSON".parse::<InputKind>(), Ok(InputKind::Snapshot));
        assert!("figma".parse::<InputKind>().is_err());
    }

    #[tokio::test]
    async fn loads_html_and_snapshot_documents() {
        let html = temp_file_with_extension("html", "<html lang=\"en\"><body><p>Hi</p></body></html>");
        let input = parse_input(html.path().to_str().unwrap(), None).unwrap();
        let doc = load_document(&input, &CaptureOptions::default()).await.unwrap();
        assert!(doc.elements_by_tag(&["p"]).next().is_some());
        assert!(!doc.has_computed_styles());

        let snapshot = temp_file_with_extension(
            "json",
            r#"{"url":"https://example.com/","nodes":[{"id":"a","tag":"html","attributes":{"lang":"fr"}}]}"#,
        );
        let input = parse_input(snapshot.path().to_str().unwrap(), None).unwrap();
        let doc = load_document(&input, &CaptureOptions::default()).await.unwrap();
        assert_eq!(doc.url(), Some("https://example.com/"));
        assert_eq!(doc.len(), 1);
    }

    #[tokio::test]
    async fn malformed_snapshot_is_serialization_error() {
        let file = temp_file_with_extension("json", "not json");
        let input = parse_input(file.path().to_str().unwrap(), None).unwrap();
        let err = load_document(&input, &CaptureOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, A11yError::Serialization(_)));
    }
}
