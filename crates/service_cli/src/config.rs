//! CLI configuration management
//!
//! Settings come from three sources, highest priority first:
//!
//! 1. Command-line arguments
//! 2. TOML configuration file
//! 3. Built-in defaults
//!
//! ```toml
//! workers = 16
//! ranks = 4
//! remainder = "spread"
//! log_level = "debug"
//! run_id = 42
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use estimator_engine::mc::{RemainderPolicy, DEFAULT_WORKERS};
use serde::Deserialize;

use crate::{CliError, Result};

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "area-estimator.toml";

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::Usage(format!(
                "Invalid log level: {s}. Must be one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Resolved CLI settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Worker threads for the `threads` command
    pub workers: usize,
    /// Participants for the `distributed` command
    pub ranks: usize,
    /// Handling of `samples % workers` leftover samples
    #[serde(deserialize_with = "deserialize_remainder")]
    pub remainder: RemainderPolicy,
    /// Log level
    pub log_level: LogLevel,
    /// Fixed run identifier (drawn from the clock when absent)
    pub run_id: Option<u64>,
}

fn deserialize_remainder<'de, D>(deserializer: D) -> std::result::Result<RemainderPolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    RemainderPolicy::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            ranks: DEFAULT_WORKERS,
            remainder: RemainderPolicy::Drop,
            log_level: LogLevel::Info,
            run_id: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::ConfigFile(format!("Failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&content).map_err(|e| {
            CliError::ConfigFile(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<()> {
        if let Some(run_id) = cli.run_id {
            self.run_id = Some(run_id);
        }
        if let Some(remainder) = &cli.remainder {
            self.remainder = RemainderPolicy::from_str(remainder)
                .map_err(|e| CliError::Usage(e.to_string()))?;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if cli.verbose && self.log_level != LogLevel::Trace {
            self.log_level = LogLevel::Debug;
        }
        Ok(())
    }
}

/// Command-line overrides collected from global options
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file path
    pub config_file: Option<PathBuf>,
    /// Run identifier override
    pub run_id: Option<u64>,
    /// Remainder policy override
    pub remainder: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
    /// Verbose output (raises the log level to debug)
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// An explicit `--config` file must exist. The default file is read only if
/// present.
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.merge_with_cli(cli)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.workers, 8);
        assert_eq!(config.ranks, 8);
        assert_eq!(config.remainder, RemainderPolicy::Drop);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.run_id, None);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            workers = 16
            ranks = 4
            remainder = "spread"
            log_level = "debug"
            run_id = 42
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workers, 16);
        assert_eq!(config.ranks, 4);
        assert_eq!(config.remainder, RemainderPolicy::Spread);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.run_id, Some(42));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str("ranks = 2").unwrap();
        assert_eq!(config.ranks, 2);
        assert_eq!(config.workers, 8);
        assert_eq!(config.remainder, RemainderPolicy::Drop);
    }

    #[test]
    fn test_unknown_remainder_in_toml() {
        let result: std::result::Result<CliConfig, _> = toml::from_str(r#"remainder = "round""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_merge() {
        let mut config = CliConfig {
            run_id: Some(1),
            ..Default::default()
        };
        let cli = CliOverrides {
            run_id: Some(99),
            remainder: Some("first-worker".to_string()),
            log_level: Some("warn".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.run_id, Some(99));
        assert_eq!(config.remainder, RemainderPolicy::FirstWorker);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let mut config = CliConfig::default();
        let cli = CliOverrides {
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_remainder_override_is_usage_error() {
        let mut config = CliConfig::default();
        let cli = CliOverrides {
            remainder: Some("round".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.merge_with_cli(&cli),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let cli = CliOverrides {
            config_file: Some(PathBuf::from("/nonexistent/area-estimator.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(CliError::ConfigFile(_))));
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "area-estimator-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "workers = 3\nremainder = \"strict\"\n").unwrap();

        let config = CliConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.workers, 3);
        assert_eq!(config.remainder, RemainderPolicy::Strict);
    }
}
