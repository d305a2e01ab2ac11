use a11yc_lib::{Category, InputKind, Severity, Viewport};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "a11yc")]
#[command(
    version,
    about = "Accessibility Checker - Scan web pages for common WCAG 2.1 problems",
    long_about = "Accessibility Checker (a11yc)\n\nModes:\n- audit: run the rule detectors (images, svg, links, headings, forms, contrast, language, landmarks, buttons) over a live URL, a saved DOM snapshot, or a static HTML file.\n- capture: render a page with headless Chromium and save its DOM snapshot for later audits.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output (debug logs on stderr)")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for viewport/timeouts/rules; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a page, snapshot or HTML file
    Audit {
        #[arg(long, help = "Input (http(s) URL, .json snapshot, or .html file)")]
        input: String,

        #[arg(long, value_enum, help = "Override type detection for input")]
        input_type: Option<InputType>,

        #[arg(
            long,
            default_value = "1440x900",
            help = "Viewport dimensions (WIDTHxHEIGHT) for URL capture"
        )]
        viewport: Viewport,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Categories to report (images,svg,links,headings,forms,contrast,language,landmarks,buttons,colorblind)"
        )]
        categories: Option<Vec<Category>>,

        #[arg(long, value_enum, help = "Drop issues below this severity")]
        min_severity: Option<SeverityArg>,

        #[arg(
            long,
            value_enum,
            default_value = "high",
            help = "Exit with status 1 when an issue at or above this severity is found"
        )]
        fail_on: SeverityArg,

        #[arg(
            long,
            default_value = "5",
            help = "Number of grouped issues to list in the summary"
        )]
        top_issues: usize,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value = "30",
            help = "Navigation timeout (seconds) for URL capture"
        )]
        nav_timeout: u64,

        #[arg(
            long,
            default_value = "10",
            help = "Network idle timeout (seconds) for URL capture"
        )]
        network_idle_timeout: u64,

        #[arg(
            long,
            default_value = "45",
            help = "Process timeout (seconds) for Playwright invocation"
        )]
        process_timeout: u64,
    },

    /// Capture a page's DOM and computed styles as a JSON snapshot
    Capture {
        #[arg(long, help = "Page to capture (http(s)/file URL or local .html file)")]
        input: String,

        #[arg(
            long,
            default_value = "1440x900",
            help = "Viewport dimensions (WIDTHxHEIGHT)"
        )]
        viewport: Viewport,

        #[arg(
            long,
            short,
            help = "Write the snapshot to this file (a JSON status is printed to stdout); inlined in the status when omitted"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, help = "Show the browser window instead of running headless")]
        headed: bool,

        #[arg(
            long,
            default_value = "30",
            help = "Navigation timeout (seconds)"
        )]
        nav_timeout: u64,

        #[arg(
            long,
            default_value = "10",
            help = "Network idle timeout (seconds)"
        )]
        network_idle_timeout: u64,

        #[arg(
            long,
            default_value = "45",
            help = "Process timeout (seconds) for Playwright invocation"
        )]
        process_timeout: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputType {
    Url,
    Snapshot,
    Html,
}

impl From<InputType> for InputKind {
    fn from(value: InputType) -> Self {
        match value {
            InputType::Url => InputKind::Url,
            InputType::Snapshot => InputKind::Snapshot,
            InputType::Html => InputKind::Html,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    High,
    Medium,
    Low,
}

impl From<SeverityArg> for Severity {
    fn from(value: SeverityArg) -> Self {
        match value {
            SeverityArg::High => Severity::High,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::Low => Severity::Low,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, InputType, OutputFormat, SeverityArg};
    use a11yc_lib::Category;
    use clap::Parser;

    #[test]
    fn audit_command_uses_defaults() {
        let cli = Cli::parse_from(["a11yc", "audit", "--input", "https://example.com"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
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
                assert_eq!(input, "https://example.com");
                assert!(input_type.is_none());
                assert_eq!(viewport.width, 1440);
                assert_eq!(viewport.height, 900);
                assert!(categories.is_none());
                assert!(min_severity.is_none());
                assert!(matches!(fail_on, SeverityArg::High));
                assert_eq!(top_issues, 5);
                assert!(matches!(format, OutputFormat::Json));
                assert!(output.is_none());
                assert_eq!(nav_timeout, 30);
                assert_eq!(network_idle_timeout, 10);
                assert_eq!(process_timeout, 45);
            }
            _ => panic!("expected audit command"),
        }
    }

    #[test]
    fn audit_command_respects_overrides() {
        let cli = Cli::parse_from([
            "a11yc",
            "--verbose",
            "audit",
            "--input",
            "page.txt",
            "--input-type",
            "html",
            "--categories",
            "images,contrast",
            "--min-severity",
            "medium",
            "--fail-on",
            "low",
            "--format",
            "pretty",
            "--viewport",
            "390x844",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Audit {
                input_type,
                categories,
                min_severity,
                fail_on,
                format,
                viewport,
                ..
            } => {
                assert!(matches!(input_type, Some(InputType::Html)));
                assert_eq!(
                    categories,
                    Some(vec![Category::Images, Category::Contrast])
                );
                assert!(matches!(min_severity, Some(SeverityArg::Medium)));
                assert!(matches!(fail_on, SeverityArg::Low));
                assert!(matches!(format, OutputFormat::Pretty));
                assert_eq!(viewport.width, 390);
            }
            _ => panic!("expected audit command"),
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let res = Cli::try_parse_from([
            "a11yc",
            "audit",
            "--input",
            "page.html",
            "--categories",
            "images,colour",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn capture_command_parses() {
        let cli = Cli::parse_from([
            "a11yc",
            "capture",
            "--input",
            "https://example.com",
            "-o",
            "snap.json",
            "--headed",
        ]);
        match cli.command {
            Commands::Capture {
                input,
                output,
                headed,
                process_timeout,
                ..
            } => {
                assert_eq!(input, "https://example.com");
                assert_eq!(output.unwrap().to_str(), Some("snap.json"));
                assert!(headed);
                assert_eq!(process_timeout, 45);
            }
            _ => panic!("expected capture command"),
        }
    }
}
