use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use a11yc_lib::output::{ErrorOutput, A11YC_OUTPUT_VERSION};
use a11yc_lib::{A11yError, A11yOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &A11yOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: A11yError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = A11yOutput::Error(ErrorOutput {
        version: A11YC_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // 2 is reserved for errors; findings at or above --fail-on use 1.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &A11yOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &A11yOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &A11yOutput, colorize: bool) -> String {
    match body {
        A11yOutput::Audit(out) => {
            let mut buf = String::new();
            let status = if out.passed { "PASS" } else { "FAIL" };
            let status_colored = color(status, if out.passed { "32" } else { "31" }, colorize);
            writeln!(buf, "{} Accessibility audit of {}", status_colored, out.input.value).ok();
            let score = format!("{:.1}%", out.score * 100.0);
            writeln!(
                buf,
                "Score: {} ({} high, {} medium, {} low; fail on {})",
                color(&score, score_color_code(out.score), colorize),
                out.counts.high,
                out.counts.medium,
                out.counts.low,
                out.fail_on
            )
            .ok();

            let issues = out
                .summary
                .as_ref()
                .map(|s| s.top_issues.as_slice())
                .unwrap_or_default();
            if !issues.is_empty() {
                writeln!(buf, "Top issues:").ok();
                for issue in issues {
                    writeln!(buf, "- {issue}").ok();
                }
            }

            writeln!(buf, "Categories:").ok();
            for (category, result) in out.report.iter() {
                if result.total == 0 && result.issues.is_empty() {
                    continue;
                }
                let count = result.issues.len();
                let issues_text = format!("{} issue{}", count, if count == 1 { "" } else { "s" });
                let code = if count == 0 { "32" } else { "33" };
                writeln!(
                    buf,
                    "- {:10} {:>4} checked, {}",
                    category.as_str(),
                    result.total,
                    color(&issues_text, code, colorize)
                )
                .ok();
            }
            buf
        }
        A11yOutput::Capture(out) => {
            let mut buf = String::new();
            let header = color("[CAPTURE]", "36", colorize);
            writeln!(
                buf,
                "{} {} at {} ({} nodes)",
                header, out.url, out.viewport, out.node_count
            )
            .ok();
            if let Some(path) = &out.snapshot_path {
                writeln!(buf, "Snapshot: {}", path.display()).ok();
            }
            buf
        }
        A11yOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Map score to ANSI color code.
fn score_color_code(score: f32) -> &'static str {
    if score >= 0.9 {
        "32" // green
    } else if score >= 0.75 {
        "33" // yellow
    } else {
        "31" // red
    }
}

/// Determine exit code for the audit command.
pub fn exit_code_for_audit(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
