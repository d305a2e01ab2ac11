//! Configuration file support.
//!
//! ```toml
//! viewport = { width = 1440, height = 900 }
//!
//! [timeouts]
//! navigation = "30s"
//! network_idle = "10s"
//! process = "45s"
//!
//! [rules]
//! contrast_max_elements = 500
//! non_descriptive_links = ["cliquez ici", "en savoir plus", "voir", "lire la suite"]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{A11yError, Result};
use crate::rules::AuditOptions;
use crate::Viewport;

const CONFIG_DIR: &str = "a11yc";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub viewport: Viewport,
    pub timeouts: Timeouts,
    pub rules: AuditOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub navigation: Duration,
    #[serde(with = "humantime_serde")]
    pub network_idle: Duration,
    /// Hard limit on the capture process, including browser startup.
    #[serde(with = "humantime_serde")]
    pub process: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(30),
            network_idle: Duration::from_secs(10),
            process: Duration::from_secs(45),
        }
    }
}

impl Config {
    /// `~/.config/a11yc/config.toml`, honoring `XDG_CONFIG_HOME`.
    pub fn central_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME")
                    .filter(|v| !v.is_empty())
                    .map(|home| PathBuf::from(home).join(".config"))
            })?;
        Some(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Reads `path` when given, else the central config when it exists, else
    /// returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::central_config_path().filter(|p| p.is_file()) {
                Some(central) => Self::from_file(&central),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| A11yError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport.is_empty() {
            return Err(A11yError::Config(format!(
                "viewport must be non-zero, got {}",
                self.viewport
            )));
        }
        let timeouts = [
            ("navigation", self.timeouts.navigation),
            ("network_idle", self.timeouts.network_idle),
            ("process", self.timeouts.process),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, d)| d.is_zero()) {
            return Err(A11yError::Config(format!(
                "timeouts.{} must be greater than zero",
                name
            )));
        }
        if self.rules.contrast_max_elements == 0 {
            return Err(A11yError::Config(
                "rules.contrast_max_elements must be greater than zero".to_string(),
            ));
        }
        if self
            .rules
            .non_descriptive_links
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err(A11yError::Config(
                "rules.non_descriptive_links must not contain empty phrases".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DEFAULT_CONTRAST_MAX_ELEMENTS;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.viewport, Viewport::default());
        assert_eq!(cfg.timeouts.navigation, Duration::from_secs(30));
        assert_eq!(cfg.timeouts.network_idle, Duration::from_secs(10));
        assert_eq!(cfg.timeouts.process, Duration::from_secs(45));
        assert_eq!(cfg.rules.contrast_max_elements, DEFAULT_CONTRAST_MAX_ELEMENTS);
        assert_eq!(cfg.rules.non_descriptive_links.len(), 4);
        cfg.validate().expect("defaults validate");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            viewport = { width = 390, height = 844 }

            [timeouts]
            navigation = "1m 30s"

            [rules]
            non_descriptive_links = ["click here", "more"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.viewport.width, 390);
        assert_eq!(cfg.timeouts.navigation, Duration::from_secs(90));
        assert_eq!(cfg.timeouts.process, Duration::from_secs(45));
        assert_eq!(cfg.rules.non_descriptive_links, vec!["click here", "more"]);
        assert_eq!(cfg.rules.contrast_max_elements, DEFAULT_CONTRAST_MAX_ELEMENTS);
    }

    #[test]
    fn unknown_keys_and_bad_durations_are_rejected() {
        assert!(Config::from_toml("threshold = 0.9").is_err());
        let err = Config::from_toml("[timeouts]\nnavigation = \"soon\"").unwrap_err();
        assert!(matches!(err, A11yError::Config(_)));
    }

    #[test]
    fn validate_rejects_zero_values() {
        let mut cfg = Config::default();
        cfg.timeouts.process = Duration::ZERO;
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("timeouts.process"), "{err}");

        let mut cfg = Config::default();
        cfg.rules.contrast_max_elements = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.viewport.height = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\ncontrast_max_elements = 25").unwrap();
        let cfg = Config::load(Some(file.path())).unwrap();
        assert_eq!(cfg.rules.contrast_max_elements, 25);
    }

    #[test]
    fn load_missing_explicit_path_is_io_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, A11yError::Io(_)));
    }
}
