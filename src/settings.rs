use std::path::Path;
use std::time::Duration;

use a11yc_lib::{A11yError, Config, Viewport};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct CaptureFlagSources {
    pub viewport: bool,
    pub nav_timeout: bool,
    pub network_idle_timeout: bool,
    pub process_timeout: bool,
}

impl CaptureFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            viewport: flag_present(args, "--viewport"),
            nav_timeout: flag_present(args, "--nav-timeout"),
            network_idle_timeout: flag_present(args, "--network-idle-timeout"),
            process_timeout: flag_present(args, "--process-timeout"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved capture settings after merging CLI args and config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCaptureSettings {
    pub viewport: Viewport,
    pub nav_timeout: Duration,
    pub network_idle_timeout: Duration,
    pub process_timeout: Duration,
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
pub fn resolve_capture_settings(
    cli_viewport: Viewport,
    cli_nav_timeout: u64,
    cli_network_idle_timeout: u64,
    cli_process_timeout: u64,
    config: &Config,
    flags: &CaptureFlagSources,
) -> ResolvedCaptureSettings {
    let pick = |present: bool, cli_secs: u64, configured: Duration| {
        if present {
            Duration::from_secs(cli_secs)
        } else {
            configured
        }
    };

    ResolvedCaptureSettings {
        viewport: if flags.viewport {
            cli_viewport
        } else {
            config.viewport
        },
        nav_timeout: pick(
            flags.nav_timeout,
            cli_nav_timeout,
            config.timeouts.navigation,
        ),
        network_idle_timeout: pick(
            flags.network_idle_timeout,
            cli_network_idle_timeout,
            config.timeouts.network_idle,
        ),
        process_timeout: pick(
            flags.process_timeout,
            cli_process_timeout,
            config.timeouts.process,
        ),
    }
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/a11yc/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, A11yError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        A11yError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        A11yError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    settings: &ResolvedCaptureSettings,
    config: &Config,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: viewport={}, timeouts: nav={}s, network-idle={}s, process={}s, rules: contrast_max_elements={}, non_descriptive_links={}",
        settings.viewport,
        settings.nav_timeout.as_secs(),
        settings.network_idle_timeout.as_secs(),
        settings.process_timeout.as_secs(),
        config.rules.contrast_max_elements,
        config.rules.non_descriptive_links.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11yc_lib::config::Timeouts;
    use a11yc_lib::AuditOptions;

    #[test]
    fn flag_present_matches_both_spellings() {
        let args: Vec<String> = ["a11yc", "audit", "--viewport=390x844", "--nav-timeout", "5"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(flag_present(&args, "--viewport"));
        assert!(flag_present(&args, "--nav-timeout"));
        assert!(!flag_present(&args, "--process-timeout"));
        assert!(!flag_present(&args, "--nav"));
    }

    #[test]
    fn resolve_capture_settings_prefers_config_when_flags_absent() {
        let cfg = Config {
            viewport: Viewport {
                width: 111,
                height: 222,
            },
            timeouts: Timeouts {
                navigation: Duration::from_secs(5),
                network_idle: Duration::from_secs(6),
                process: Duration::from_secs(7),
            },
            rules: AuditOptions::default(),
        };
        let flags = CaptureFlagSources::default();
        let resolved = resolve_capture_settings(
            Viewport {
                width: 999,
                height: 999,
            },
            30,
            10,
            45,
            &cfg,
            &flags,
        );

        assert_eq!(resolved.viewport.width, 111);
        assert_eq!(resolved.viewport.height, 222);
        assert_eq!(resolved.nav_timeout, Duration::from_secs(5));
        assert_eq!(resolved.network_idle_timeout, Duration::from_secs(6));
        assert_eq!(resolved.process_timeout, Duration::from_secs(7));
    }

    #[test]
    fn resolve_capture_settings_prefers_cli_when_flags_present() {
        let cfg = Config::default();
        let flags = CaptureFlagSources {
            viewport: true,
            nav_timeout: true,
            network_idle_timeout: true,
            process_timeout: true,
        };
        let resolved = resolve_capture_settings(
            Viewport {
                width: 10,
                height: 20,
            },
            50,
            60,
            70,
            &cfg,
            &flags,
        );

        assert_eq!(resolved.viewport.width, 10);
        assert_eq!(resolved.viewport.height, 20);
        assert_eq!(resolved.nav_timeout, Duration::from_secs(50));
        assert_eq!(resolved.network_idle_timeout, Duration::from_secs(60));
        assert_eq!(resolved.process_timeout, Duration::from_secs(70));
    }

    #[test]
    fn load_config_wraps_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[rules]\ncontrast_max_elements = 0\n").unwrap();
        let err = load_config(Some(file.path())).unwrap_err().to_string();
        assert!(err.contains("Invalid config ("), "{err}");
        assert!(err.contains("contrast_max_elements"), "{err}");
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let cfg = Config::default();
        let settings = ResolvedCaptureSettings {
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            nav_timeout: Duration::from_secs(12),
            network_idle_timeout: Duration::from_secs(8),
            process_timeout: Duration::from_secs(45),
        };
        let summary = format_effective_config(&settings, &cfg, Some(Path::new("a11yc.toml")));
        assert!(summary.contains("1280x720"));
        assert!(summary.contains("nav=12s"));
        assert!(summary.contains("network-idle=8s"));
        assert!(summary.contains("process=45s"));
        assert!(summary.contains("contrast_max_elements=500"));
        assert!(summary.contains("non_descriptive_links=4"));
        assert!(summary.contains("a11yc.toml"));
    }
}
