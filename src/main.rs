mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_audit, run_capture};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Audit {
            input,
            input_type,
            viewport,
            categories,
            min_severity,
            fail_on,
            top_issues,
            format,
            output,
            nav_timeout,
            network_idle_timeout,
            process_timeout,
        } => {
            run_audit(
                &raw_args,
                args.config,
                args.verbose,
                input,
                input_type,
                viewport,
                categories,
                min_severity,
                fail_on,
                top_issues,
                format,
                output,
                nav_timeout,
                network_idle_timeout,
                process_timeout,
            )
            .await
        }
        Commands::Capture {
            input,
            viewport,
            output,
            format,
            headed,
            nav_timeout,
            network_idle_timeout,
            process_timeout,
        } => {
            run_capture(
                &raw_args,
                args.config,
                args.verbose,
                input,
                viewport,
                output,
                format,
                headed,
                nav_timeout,
                network_idle_timeout,
                process_timeout,
            )
            .await
        }
    }
}
