//! Configuration management for archmetrics.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. An explicit config file, when given
//! 3. Project-local `archmetrics.toml` file
//! 4. User config `~/.config/archmetrics/config.toml`
//! 5. Built-in defaults (lowest priority)
//!
//! Only the first config file found is read; files are not merged.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

mod defaults;

pub use defaults::*;

use crate::metrics::PartitionStrategy;
use crate::traversal::ContainmentMode;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Containment hierarchy configuration.
    pub traversal: TraversalConfig,

    /// Module cohesion configuration.
    pub cohesion: CohesionConfig,

    /// Analyser configuration.
    pub analysis: AnalysisConfig,

    /// Report rendering configuration.
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./archmetrics.toml` (project local)
    /// 2. `~/.config/archmetrics/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from `path` if given, otherwise from default locations.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        // Try project-local config first
        let project = Path::new(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Self::from_file(project);
        }

        // Try user config
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        debug!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Location of the user config file, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded config file");

        // Apply environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML text, without environment overrides.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.report.precision > 10 {
            return Err(ConfigError::Invalid(format!(
                "report.precision must be at most 10, got {}",
                self.report.precision
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`; invalid values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_CONTAINMENT) {
            match value.parse() {
                Ok(mode) => self.traversal.containment = mode,
                Err(e) => warn!(variable = ENV_CONTAINMENT, "Ignoring override: {}", e),
            }
        }
        if let Some(value) = lookup(ENV_PARTITION) {
            match value.parse() {
                Ok(strategy) => self.cohesion.partition = strategy,
                Err(e) => warn!(variable = ENV_PARTITION, "Ignoring override: {}", e),
            }
        }
        if let Some(value) = lookup(ENV_PARALLEL) {
            match parse_flag(&value) {
                Some(parallel) => self.analysis.parallel = parallel,
                None => warn!(variable = ENV_PARALLEL, "Ignoring override: not a boolean: {}", value),
            }
        }
        if let Some(value) = lookup(ENV_REPORT_FORMAT) {
            match value.parse() {
                Ok(format) => self.report.format = format,
                Err(e) => warn!(variable = ENV_REPORT_FORMAT, "Ignoring override: {}", e),
            }
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Containment hierarchy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// How CHILDREN_OF relations are read: "flattened" or "direct".
    pub containment: ContainmentMode,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            containment: DEFAULT_CONTAINMENT,
        }
    }
}

/// Module cohesion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohesionConfig {
    /// Clustering of module children: "greedy" or "connected_components".
    pub partition: PartitionStrategy,
}

impl Default for CohesionConfig {
    fn default() -> Self {
        Self {
            partition: DEFAULT_PARTITION,
        }
    }
}

/// Analyser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Compute the nodes of each metric on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: DEFAULT_PARALLEL,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Console,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(ReportFormat::Console),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Report rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: "console" or "json".
    pub format: ReportFormat,

    /// Decimal places of console percentages.
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_REPORT_FORMAT,
            precision: DEFAULT_PRECISION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.traversal.containment, ContainmentMode::Flattened);
        assert_eq!(config.cohesion.partition, PartitionStrategy::Greedy);
        assert!(!config.analysis.parallel);
        assert_eq!(config.report.format, ReportFormat::Console);
        assert_eq!(config.report.precision, DEFAULT_PRECISION);
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[traversal]"));
        assert!(toml_str.contains("[cohesion]"));
        assert!(toml_str.contains("[analysis]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("containment = \"flattened\""));
        assert!(toml_str.contains("partition = \"greedy\""));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[traversal]
containment = "direct"

[cohesion]
partition = "connected_components"

[report]
format = "json"
"#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.traversal.containment, ContainmentMode::Direct);
        assert_eq!(config.cohesion.partition, PartitionStrategy::ConnectedComponents);
        assert!(!config.analysis.parallel);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.report.precision, DEFAULT_PRECISION);
    }

    #[test]
    fn test_invalid_precision() {
        let err = Config::from_toml_str("[report]\nprecision = 42\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CONTAINMENT, "direct"),
            (ENV_PARTITION, "connected-components"),
            (ENV_PARALLEL, "yes"),
            (ENV_REPORT_FORMAT, "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.traversal.containment, ContainmentMode::Direct);
        assert_eq!(config.cohesion.partition, PartitionStrategy::ConnectedComponents);
        assert!(config.analysis.parallel);
        assert_eq!(config.report.format, ReportFormat::Json);
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_CONTAINMENT => Some("sideways".to_string()),
            ENV_PARALLEL => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(config, Config::default());
    }
}
