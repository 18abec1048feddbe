//! Configuration type definitions.

use crate::constants::{DEFAULT_ALPHA, DEFAULT_EXECUTABLE, DEFAULT_GENETIC_CODE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how to run HyPhy.
    #[serde(default)]
    pub hyphy: HyphyConfig,

    /// Default analysis settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// HyPhy installation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyphyConfig {
    /// Executable name or path (`HYPHYMP`, `HYPHYMPI`, ...).
    pub executable: String,

    /// Local build directory (contains `res/`).
    pub build_path: Option<PathBuf>,

    /// Install prefix (contains `bin/` and `lib/hyphy/`).
    pub install_path: Option<PathBuf>,

    /// Maximum number of CPUs per analysis.
    pub cpu: Option<u32>,

    /// Discard HyPhy's screen output.
    pub quiet: bool,
}

impl Default for HyphyConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            build_path: None,
            install_path: None,
            cpu: None,
            quiet: false,
        }
    }
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Log lines plus the result path.
    #[default]
    Human,
    /// One JSON envelope per result.
    Json,
}

impl OutputMode {
    /// Whether output is machine-readable.
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Default analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Genetic code name or number.
    pub genetic_code: String,

    /// Significance threshold.
    pub alpha: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            genetic_code: DEFAULT_GENETIC_CODE.to_string(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.hyphy.executable, "HYPHYMP");
        assert!(config.hyphy.build_path.is_none());
        assert_eq!(config.defaults.genetic_code, "Universal");
        assert_eq!(config.defaults.alpha, 0.1);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[hyphy]\ncpu = 8\n").unwrap();
        assert_eq!(config.hyphy.cpu, Some(8));
        assert_eq!(config.hyphy.executable, "HYPHYMP");
        assert_eq!(config.defaults, DefaultsConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.hyphy.install_path = Some(PathBuf::from("/opt/hyphy"));
        config.hyphy.quiet = true;
        config.defaults.genetic_code = "Vertebrate mtDNA".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
