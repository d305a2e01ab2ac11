//! Live page capture through the Playwright helper.

use crate::types::DomSnapshot;
use crate::{A11yError, Result, Viewport};
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use super::playwright::{
    ensure_node_available, ensure_playwright_available, map_playwright_error,
    map_playwright_status_error, map_spawn_error, ScriptError, CAPTURE_SCRIPT,
};

pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_NETWORK_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(45);

/// When set, capture reads the snapshot from this JSON file instead of
/// launching a browser.
pub const MOCK_SNAPSHOT_ENV: &str = "A11YC_MOCK_SNAPSHOT";

pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone)]
pub struct CaptureOptions {
    /// The Node.js command to use (default: "node").
    pub node_command: String,
    pub viewport: Viewport,
    pub headless: bool,
    pub navigation_timeout: Duration,
    pub network_idle_timeout: Duration,
    /// Timeout for the whole helper process, browser startup included.
    pub process_timeout: Duration,
    /// Human-readable progress lines, e.g. for a CLI spinner.
    pub progress: Option<ProgressCallback>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            node_command: "node".to_string(),
            viewport: Viewport::default(),
            headless: true,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            network_idle_timeout: DEFAULT_NETWORK_IDLE_TIMEOUT,
            process_timeout: DEFAULT_PROCESS_TIMEOUT,
            progress: None,
        }
    }
}

impl std::fmt::Debug for CaptureOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureOptions")
            .field("node_command", &self.node_command)
            .field("viewport", &self.viewport)
            .field("headless", &self.headless)
            .field("navigation_timeout", &self.navigation_timeout)
            .field("network_idle_timeout", &self.network_idle_timeout)
            .field("process_timeout", &self.process_timeout)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl CaptureOptions {
    /// Progress goes to the callback when one is set, otherwise to `info!`.
    fn report(&self, message: &str) {
        match &self.progress {
            Some(cb) => cb(message),
            None => info!("{}", message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CaptureResult {
    status: String,
    dom: Option<DomSnapshot>,
}

fn load_mock_snapshot(path: &Path) -> Result<DomSnapshot> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        A11yError::capture(format!(
            "Failed to read mock snapshot {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads `url` in headless Chromium and returns its DOM with computed styles.
pub async fn capture_snapshot(url: &str, options: &CaptureOptions) -> Result<DomSnapshot> {
    if let Some(mock) = std::env::var_os(MOCK_SNAPSHOT_ENV) {
        let path = Path::new(&mock);
        options.report(&format!("Loading mock snapshot from {}", path.display()));
        return load_mock_snapshot(path);
    }

    options.report(&format!(
        "Launching headless browser for {} ({}, nav {}s, idle {}s)…",
        url,
        options.viewport,
        options.navigation_timeout.as_secs(),
        options.network_idle_timeout.as_secs()
    ));
    ensure_node_available(&options.node_command).await?;
    ensure_playwright_available(&options.node_command).await?;

    let mut cmd = Command::new(&options.node_command);
    cmd.arg("-e")
        .arg(CAPTURE_SCRIPT)
        .arg(url)
        .arg(options.viewport.width.to_string())
        .arg(options.viewport.height.to_string())
        .arg(options.navigation_timeout.as_millis().to_string())
        .arg(options.network_idle_timeout.as_millis().to_string())
        .arg(if options.headless { "1" } else { "0" })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    options.report("Navigating and waiting for network idle (Playwright)…");
    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .map_err(|err| map_spawn_error(err, &options.node_command))?;

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_pipe {
            let _ = out.read_to_end(&mut buf).await;
        }
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_pipe {
            let _ = err.read_to_end(&mut buf).await;
        }
        buf
    });

    let status = match timeout(options.process_timeout, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(err)) => return Err(A11yError::Io(err)),
        Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
            options.report("Playwright timed out; process killed after exceeding timeout.");
            return Err(A11yError::capture(format!(
                "Playwright timed out after {:?}",
                options.process_timeout
            )));
        }
    };

    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr);
        return Err(map_playwright_error(status.to_string(), &stderr));
    }

    let stdout = String::from_utf8_lossy(&stdout);
    let result: CaptureResult = serde_json::from_str(stdout.trim()).map_err(|e| {
        A11yError::capture(format!(
            "Failed to parse Playwright output: {} - raw: {}",
            e,
            stdout.trim()
        ))
    })?;

    if result.status != "ok" {
        if let Ok(err) = serde_json::from_str::<ScriptError>(stdout.trim()) {
            return Err(map_playwright_status_error(&err.status, &err.message));
        }
        return Err(A11yError::capture(format!(
            "Playwright returned non-ok status: {}",
            result.status
        )));
    }

    let snapshot = result.dom.ok_or_else(|| {
        A11yError::capture("Playwright returned ok status but no DOM data")
    })?;

    debug!(nodes = snapshot.nodes.len(), "snapshot received");
    options.report(&format!(
        "Capture finished in {:.1}s",
        start.elapsed().as_secs_f32()
    ));
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn default_options() {
        let opts = CaptureOptions::default();
        assert_eq!(opts.node_command, "node");
        assert!(opts.headless);
        assert_eq!(opts.viewport, Viewport::default());
        assert_eq!(opts.navigation_timeout, DEFAULT_NAVIGATION_TIMEOUT);
        assert_eq!(opts.network_idle_timeout, DEFAULT_NETWORK_IDLE_TIMEOUT);
        assert_eq!(opts.process_timeout, DEFAULT_PROCESS_TIMEOUT);
        assert!(format!("{opts:?}").contains("progress: false"));
    }

    #[test]
    fn progress_callback_receives_messages() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = seen.clone();
        let opts = CaptureOptions {
            progress: Some(Arc::new(move |msg: &str| {
                sink.lock().unwrap().push(msg.to_string())
            })),
            ..CaptureOptions::default()
        };
        opts.report("hello");
        assert_eq!(seen.lock().unwrap().as_slice(), ["hello".to_string()]);
    }

    #[test]
    fn capture_result_accepts_script_output() {
        let raw = r##"{"status":"ok","dom":{"url":"https://example.com/","title":"Example","nodes":[
            {"id":"n0","tag":"html","children":["n1"],"parent":null,"attributes":{"lang":"en"},
             "boundingBox":{"x":0,"y":0,"width":1440,"height":900},
             "computedStyle":{"display":"block","visibility":"visible","opacity":1,"color":"rgb(0, 0, 0)",
               "backgroundColor":"rgba(0, 0, 0, 0)","fontSize":16,"fontWeight":"400","fontFamily":"serif","position":"static"}},
            {"id":"n1","tag":"#text","parent":"n0","text":"Hi"}
        ]}}"##;
        let result: CaptureResult = serde_json::from_str(raw).unwrap();
        let dom = result.dom.unwrap();
        assert_eq!(dom.nodes.len(), 2);
        assert!(dom.nodes[1].is_text());
        assert_eq!(
            dom.nodes[0].computed_style.as_ref().unwrap().position.as_deref(),
            Some("static")
        );
    }

    #[tokio::test]
    async fn capture_fails_cleanly_without_node() {
        if std::env::var_os(MOCK_SNAPSHOT_ENV).is_some() {
            return;
        }
        let opts = CaptureOptions {
            node_command: "definitely-not-a-binary".to_string(),
            ..CaptureOptions::default()
        };
        let err = capture_snapshot("https://example.com", &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, A11yError::Capture(_)), "{err:?}");
    }
}
