//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.bq-sql-analyzer.toml` in current directory
//! 4. `~/.config/bq-sql-analyzer/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! log_level = "warning"            # debug, info, warning, error, critical
//! log_format = "text"              # text, json
//!
//! [analyzer]
//! table_stopwords = ["USING"]      # appended to the built-in list
//! max_input_bytes = 1048576
//!
//! [rules]
//! disabled = ["style"]             # issue kinds or rule ids
//!
//! [rules.severity]
//! consistency = "error"
//! SAFE001 = "warning"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `BQ_SQL_ANALYZER_LOG_LEVEL` | Log level (falls back to `LOG_LEVEL`) |
//! | `BQ_SQL_ANALYZER_MAX_INPUT_BYTES` | Input size budget in bytes |

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{AppResult, config_error},
    query::AnalyzerOptions
};

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = ".bq-sql-analyzer.toml";

/// Default input size budget (1 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// Accepted `log_level` values
pub const LOG_LEVELS: [&str; 5] = ["debug", "info", "warning", "error", "critical"];

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level:  String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub analyzer:   AnalyzerConfig,
    #[serde(default)]
    pub rules:      RulesConfig
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level:  default_log_level(),
            log_format: LogFormat::default(),
            analyzer:   AnalyzerConfig::default(),
            rules:      RulesConfig::default()
        }
    }
}

/// Log line encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json
}

/// Heuristic tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Extra words never treated as bare table names
    #[serde(default)]
    pub table_stopwords: Vec<String>,
    /// Largest input the CLI will analyze
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            table_stopwords: Vec::new(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES
        }
    }
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule ids or issue kinds
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Severity overrides (rule id or issue kind -> severity)
    #[serde(default)]
    pub severity: HashMap<String, String>
}

fn default_log_level() -> String {
    String::from("warning")
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.bq-sql-analyzer.toml)
    /// 3. Config file in home directory
    ///    (~/.config/bq-sql-analyzer/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("bq-sql-analyzer")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single TOML file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
            .map_err(|e| config_error(format!("{} ({})", e, path.display())))
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>
    {
        if let Some(level) = lookup("BQ_SQL_ANALYZER_LOG_LEVEL").or_else(|| lookup("LOG_LEVEL")) {
            self.log_level = level;
        }
        if let Some(raw) = lookup("BQ_SQL_ANALYZER_MAX_INPUT_BYTES") {
            self.analyzer.max_input_bytes = raw.trim().parse().map_err(|_| {
                config_error(format!(
                    "BQ_SQL_ANALYZER_MAX_INPUT_BYTES must be a byte count, got '{}'",
                    raw
                ))
            })?;
        }
        Ok(())
    }

    /// Check values serde cannot
    pub fn validate(&self) -> AppResult<()> {
        let level = self.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(config_error(format!(
                "Invalid log_level '{}': expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.analyzer.max_input_bytes == 0 {
            return Err(config_error("max_input_bytes must be greater than zero"));
        }
        Ok(())
    }

    /// Analyzer options with the configured stopwords appended
    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions::default().with_extra_stopwords(&self.analyzer.table_stopwords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "warning");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.analyzer.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
        assert!(config.rules.disabled.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.log_level, "warning");
        assert_eq!(config.analyzer.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn test_env_prefixed_level_wins() {
        let mut config = Config::default();
        config
            .apply_env(env_of(&[
                ("LOG_LEVEL", "error"),
                ("BQ_SQL_ANALYZER_LOG_LEVEL", "debug")
            ]))
            .unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_fallback_level() {
        let mut config = Config::default();
        config.apply_env(env_of(&[("LOG_LEVEL", "info")])).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_bad_budget() {
        let mut config = Config::default();
        let result = config.apply_env(env_of(&[("BQ_SQL_ANALYZER_MAX_INPUT_BYTES", "lots")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let config = Config {
            log_level: String::from("verbose"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_upper_case_level() {
        let config = Config {
            log_level: String::from("CRITICAL"),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analyzer_options_extend_defaults() {
        let config = Config::from_toml("[analyzer]\ntable_stopwords = [\"using\"]").unwrap();
        let options = config.analyzer_options();
        assert!(options.is_table_stopword("USING"));
        assert!(options.is_table_stopword("WHERE"));
    }
}
