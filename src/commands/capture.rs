use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use a11yc_lib::output::{CaptureOutput, A11YC_OUTPUT_VERSION};
use a11yc_lib::{
    capture_snapshot, parse_input, A11yError, A11yOutput, CaptureOptions, InputKind,
    ProgressCallback, Viewport,
};
use url::Url;

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_capture_settings, CaptureFlagSources,
};

/// Run the capture command.
#[allow(clippy::too_many_arguments)]
pub async fn run_capture(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    viewport: Viewport,
    output: Option<PathBuf>,
    format: OutputFormat,
    headed: bool,
    nav_timeout: u64,
    network_idle_timeout: u64,
    process_timeout: u64,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let flag_sources = CaptureFlagSources::from_args(raw_args);
    let resolved = resolve_capture_settings(
        viewport,
        nav_timeout,
        network_idle_timeout,
        process_timeout,
        &config,
        &flag_sources,
    );
    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&resolved, &config, config_path.as_deref())
        );
    }

    let url = match capture_url(&input) {
        Ok(url) => url,
        Err(err) => return render_error(err, format, None),
    };

    let progress_logger: Option<ProgressCallback> = if verbose {
        Some(Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        None
    };
    let options = CaptureOptions {
        viewport: resolved.viewport,
        headless: !headed,
        navigation_timeout: resolved.nav_timeout,
        network_idle_timeout: resolved.network_idle_timeout,
        process_timeout: resolved.process_timeout,
        progress: progress_logger,
        ..CaptureOptions::default()
    };

    let snapshot = match capture_snapshot(&url, &options).await {
        Ok(snapshot) => snapshot,
        Err(err) => return render_error(err, format, None),
    };
    let node_count = snapshot.nodes.len();

    let (snapshot_path, snapshot) = match output {
        Some(path) => {
            if let Err(err) = write_snapshot(&path, &snapshot) {
                return render_error(err, format, None);
            }
            (Some(path), None)
        }
        None => (None, Some(snapshot)),
    };

    let body = A11yOutput::Capture(CaptureOutput {
        version: A11YC_OUTPUT_VERSION.to_string(),
        url,
        viewport: resolved.viewport,
        node_count,
        snapshot_path,
        snapshot,
    });
    if let Err(err) = write_output(&body, format, None) {
        return render_error(A11yError::Config(err.to_string()), format, None);
    }
    ExitCode::SUCCESS
}

/// Local HTML files are captured through a `file://` URL.
fn capture_url(input: &str) -> Result<String, A11yError> {
    let parsed = parse_input(input, None)?;
    match parsed.kind {
        InputKind::Url => Ok(parsed.value),
        InputKind::Html => {
            let absolute = std::fs::canonicalize(&parsed.value)?;
            Url::from_file_path(&absolute)
                .map(String::from)
                .map_err(|_| {
                    A11yError::input(format!(
                        "Cannot build a file URL for {}",
                        absolute.display()
                    ))
                })
        }
        InputKind::Snapshot => Err(A11yError::input(
            "Capture needs a page, not a snapshot; pass an http(s) URL or an .html file",
        )),
    }
}

fn write_snapshot(path: &Path, snapshot: &a11yc_lib::DomSnapshot) -> Result<(), A11yError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, content)?;
    Ok(())
}
