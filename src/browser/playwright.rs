//! Playwright helper script, availability checks and error mapping.

use crate::{A11yError, Result};
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Walks the live document and prints `{status: "ok", dom: DomSnapshot}`.
///
/// Arguments: url, width, height, navigation timeout (ms), network-idle
/// timeout (ms), headless flag.
pub(crate) const CAPTURE_SCRIPT: &str = r#"
const [, url, width, height, navTimeout, idleTimeout, headlessFlag] = process.argv;

async function run() {
  let browser;
  try {
    const { chromium } = require('playwright');
    browser = await chromium.launch({ headless: headlessFlag !== '0' });
    const context = await browser.newContext({
      viewport: { width: parseInt(width, 10), height: parseInt(height, 10) }
    });
    const page = await context.newPage();

    await page.goto(url, { waitUntil: 'networkidle', timeout: parseInt(navTimeout, 10) });
    await page.waitForLoadState('networkidle', { timeout: parseInt(idleTimeout, 10) });

    const dom = await page.evaluate(() => {
      const nodes = [];
      let nextId = 0;

      function styleOf(el) {
        const s = window.getComputedStyle(el);
        return {
          display: s.display || null,
          visibility: s.visibility || null,
          opacity: s.opacity !== '' ? parseFloat(s.opacity) : null,
          color: s.color || null,
          backgroundColor: s.backgroundColor || null,
          fontSize: parseFloat(s.fontSize) || null,
          fontWeight: s.fontWeight || null,
          fontFamily: s.fontFamily || null,
          position: s.position || null
        };
      }

      // Pre-order walk with an explicit stack; ids are assigned on visit.
      const stack = [[document.documentElement, null]];
      while (stack.length > 0) {
        const [node, parentId] = stack.pop();
        const id = `n${nextId++}`;
        if (node.nodeType === Node.TEXT_NODE) {
          nodes.push({ id, tag: '#text', parent: parentId, text: node.textContent });
        } else {
          const el = node;
          const rect = el.getBoundingClientRect();
          const attributes = {};
          for (const attr of el.attributes) {
            attributes[attr.name] = attr.value;
          }
          const entry = {
            id,
            tag: el.tagName.toLowerCase(),
            children: [],
            parent: parentId,
            attributes,
            boundingBox: { x: rect.x, y: rect.y, width: rect.width, height: rect.height },
            computedStyle: styleOf(el)
          };
          nodes.push(entry);
          const kids = Array.from(el.childNodes).filter(
            (c) => c.nodeType === Node.ELEMENT_NODE || c.nodeType === Node.TEXT_NODE
          );
          for (let i = kids.length - 1; i >= 0; i--) {
            stack.push([kids[i], id]);
          }
        }
      }

      const byId = new Map(nodes.map((n) => [n.id, n]));
      for (const n of nodes) {
        if (n.parent !== null) {
          byId.get(n.parent).children.push(n.id);
        }
      }

      return { url: window.location.href, title: document.title, nodes };
    });

    console.log(JSON.stringify({ status: 'ok', dom }));
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    console.error(JSON.stringify({ status: 'error', message }));
    process.exitCode = 1;
  } finally {
    if (browser) {
      await browser.close();
    }
  }
}

run();
"#;

pub(crate) const NODE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

const PLAYWRIGHT_CHECK_SCRIPT: &str = "require('playwright'); process.stdout.write('ok');";

const MISSING_PLAYWRIGHT: &str =
    "Playwright npm package is missing; install with `npm install playwright`.";

const TIMEOUT_HINT: &str =
    "Hint: increase --nav-timeout/--network-idle-timeout or --process-timeout, and ensure the page finishes loading.";

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ScriptError {
    pub status: String,
    pub message: String,
}

pub(crate) fn map_spawn_error(err: io::Error, command: &str) -> A11yError {
    if err.kind() == io::ErrorKind::NotFound {
        A11yError::capture(format!(
            "Unable to spawn Playwright helper; '{}' was not found on PATH",
            command
        ))
    } else {
        A11yError::Io(err)
    }
}

/// Maps helper stderr (JSON error record or raw Node output) to an error.
pub(crate) fn map_playwright_error(status_text: impl Into<String>, stderr: &str) -> A11yError {
    if let Ok(error) = serde_json::from_str::<ScriptError>(stderr.trim()) {
        return map_playwright_status_error(&error.status, &error.message);
    }

    let lower = stderr.to_ascii_lowercase();
    if lower.contains("cannot find module 'playwright'") {
        return A11yError::capture(MISSING_PLAYWRIGHT);
    }
    if lower.contains("timeout") {
        return A11yError::capture(format!("Playwright timed out. {}", TIMEOUT_HINT));
    }

    A11yError::capture(format!(
        "Playwright exited with status {}: {}",
        status_text.into(),
        stderr.trim()
    ))
}

pub(crate) fn map_playwright_status_error(status: &str, message: &str) -> A11yError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("cannot find module 'playwright'") {
        A11yError::capture(MISSING_PLAYWRIGHT)
    } else if lower.contains("timeout") {
        A11yError::capture(format!(
            "Playwright error (status {}): {}. {}",
            status, message, TIMEOUT_HINT
        ))
    } else {
        A11yError::capture(format!("Playwright error (status {}): {}", status, message))
    }
}

pub(crate) async fn ensure_node_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let status = tokio::time::timeout(NODE_CHECK_TIMEOUT, cmd.status())
        .await
        .map_err(|_| {
            A11yError::capture(format!(
                "Timed out checking node availability after {:?}",
                NODE_CHECK_TIMEOUT
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !status.success() {
        return Err(A11yError::capture(format!(
            "Node command {:?} is not available (exit {})",
            node_command, status
        )));
    }
    Ok(())
}

pub(crate) async fn ensure_playwright_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("-e")
        .arg(PLAYWRIGHT_CHECK_SCRIPT)
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let output = tokio::time::timeout(NODE_CHECK_TIMEOUT, cmd.output())
        .await
        .map_err(|_| {
            A11yError::capture(format!(
                "Timed out checking Playwright availability after {:?}",
                NODE_CHECK_TIMEOUT
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(map_playwright_error(format!("{:?}", output.status), &stderr));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: A11yError) -> String {
        match err {
            A11yError::Capture(msg) => msg,
            other => panic!("expected capture error, got {other:?}"),
        }
    }

    #[test]
    fn missing_module_is_detected_in_json_and_plain_stderr() {
        let json = map_playwright_error(
            "1",
            r#"{"status":"error","message":"Cannot find module 'playwright'"}"#,
        );
        assert!(message(json).contains("npm install playwright"));

        let plain = map_playwright_error(
            "exit status: 1",
            "Error: Cannot find module 'playwright'\n    at Module._resolveFilename",
        );
        assert!(message(plain).contains("Playwright npm package is missing"));
    }

    #[test]
    fn timeouts_carry_cli_hint() {
        let msg = message(map_playwright_error(
            "exit status: 1",
            r#"{"status":"error","message":"Navigation timeout of 30000ms exceeded"}"#,
        ));
        assert!(msg.contains("Navigation timeout"));
        assert!(msg.contains("--nav-timeout"));

        let msg = message(map_playwright_error("exit status: 1", "page.goto: Timeout 30000ms"));
        assert!(msg.contains("--process-timeout"));
    }

    #[test]
    fn other_errors_keep_their_message() {
        let msg = message(map_playwright_status_error("error", "net::ERR_NAME_NOT_RESOLVED"));
        assert_eq!(msg, "Playwright error (status error): net::ERR_NAME_NOT_RESOLVED");
    }

    #[test]
    fn spawn_not_found_mentions_path() {
        let err = map_spawn_error(io::Error::from(io::ErrorKind::NotFound), "nodejs");
        assert!(message(err).contains("'nodejs' was not found on PATH"));
    }

    #[tokio::test]
    async fn availability_checks_fail_for_missing_binary() {
        assert!(ensure_node_available("definitely-not-a-binary").await.is_err());
        assert!(ensure_playwright_available("definitely-not-a-binary")
            .await
            .is_err());
    }
}
