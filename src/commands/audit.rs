use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use a11yc_lib::output::{AuditOutput, InputDescriptor, Summary, A11YC_OUTPUT_VERSION};
use a11yc_lib::summary::ReportFilter;
use a11yc_lib::{
    accessibility_score, generate_top_issues, load_document, parse_input, severity_counts,
    style_resolver_for, A11yError, A11yOutput, Auditor, CaptureOptions, Category, InputKind,
    ProgressCallback, Severity, Viewport,
};
use tracing::info;

use crate::cli::{InputType, OutputFormat, SeverityArg};
use crate::formatting::{exit_code_for_audit, render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_capture_settings, CaptureFlagSources,
};

/// Run the audit command.
#[allow(clippy::too_many_arguments)]
pub async fn run_audit(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    input_type: Option<InputType>,
    viewport: Viewport,
    categories: Option<Vec<Category>>,
    min_severity: Option<SeverityArg>,
    fail_on: SeverityArg,
    top_issues: usize,
    format: OutputFormat,
    output: Option<PathBuf>,
    nav_timeout: u64,
    network_idle_timeout: u64,
    process_timeout: u64,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
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
        eprintln!("Parsing input\u{2026}");
    }

    let parsed = match parse_input(&input, input_type.map(InputKind::from)) {
        Ok(res) => res,
        Err(err) => return render_error(A11yError::from(err), format, output.clone()),
    };

    let progress_logger: Option<ProgressCallback> = if verbose {
        Some(Arc::new(|msg: &str| eprintln!("{msg}")))
    } else {
        None
    };
    let capture = CaptureOptions {
        viewport: resolved.viewport,
        navigation_timeout: resolved.nav_timeout,
        network_idle_timeout: resolved.network_idle_timeout,
        process_timeout: resolved.process_timeout,
        progress: progress_logger,
        ..CaptureOptions::default()
    };

    if verbose {
        eprintln!("Loading document ({:?})\u{2026}", parsed.kind);
    }
    let doc = match load_document(&parsed, &capture).await {
        Ok(doc) => doc,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let styles = style_resolver_for(&doc);
    let session = Auditor::new(config.rules.clone()).run(&doc, styles.as_ref());
    let filter = ReportFilter {
        categories: categories.unwrap_or_default(),
        min_severity: min_severity.map(Severity::from),
    };
    let report = if filter.is_noop() {
        session.into_report()
    } else {
        filter.apply(session.report())
    };

    let fail_on = Severity::from(fail_on);
    let counts = severity_counts(&report);
    let passed = counts.at_least(fail_on) == 0;
    let score = accessibility_score(&report);
    info!(
        issues = counts.total(),
        score = score,
        passed = passed,
        "audit finished"
    );

    let top = generate_top_issues(&report, top_issues);
    let body = A11yOutput::Audit(AuditOutput {
        version: A11YC_OUTPUT_VERSION.to_string(),
        input: InputDescriptor::from(&parsed),
        viewport: (parsed.kind == InputKind::Url).then_some(resolved.viewport),
        score,
        passed,
        fail_on,
        counts,
        summary: (!top.is_empty()).then(|| Summary { top_issues: top }),
        report,
    });

    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(A11yError::Config(err.to_string()), format, output);
    }
    exit_code_for_audit(passed)
}
