//! CLI configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::Level;

use huffpack::{Error, HuffmanConfig, LeafPolicy, Result};

/// Settings read from a `--config` JSON file.
///
/// Command-line flags override whatever the file sets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Which symbols get a leaf in the code tree
    #[serde(default)]
    pub leaf_policy: LeafPolicy,

    /// Replace existing output files
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            leaf_policy: LeafPolicy::default(),
            overwrite: false,
        }
    }
}

impl CliConfig {
    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
            .map_err(|err| Error::config(format!("{}: {}", path.display(), err)))
    }

    /// Parse a configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::config(err.to_string()))
    }

    /// Codec settings derived from this configuration.
    pub fn huffman_config(&self) -> HuffmanConfig {
        HuffmanConfig::new().with_leaf_policy(self.leaf_policy)
    }

    /// Tracing level for the configured log level.
    pub fn level(&self) -> Level {
        parse_log_level(&self.log_level)
    }
}

/// Map a level name to a tracing level. Unknown names fall back to INFO.
pub fn parse_log_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.leaf_policy, LeafPolicy::AllSymbols);
        assert!(!config.overwrite);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(CliConfig::from_json("{}").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = CliConfig::from_json(
            r#"{"log_level": "debug", "leaf_policy": "observed_only", "overwrite": true}"#,
        )
        .unwrap();
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.leaf_policy, LeafPolicy::ObservedOnly);
        assert!(config.overwrite);
        assert_eq!(
            config.huffman_config().leaf_policy,
            LeafPolicy::ObservedOnly
        );
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let err = CliConfig::from_json(r#"{"leaf_policy": "sometimes"}"#).unwrap_err();
        assert_eq!(err.category(), "config");

        let err = CliConfig::from_json(r#"{"level": "info"}"#).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CliConfig::from_file(Path::new("/nonexistent/huffpack.json")).unwrap_err();
        assert_eq!(err.category(), "io_error");
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("TRACE"), Level::TRACE);
        assert_eq!(parse_log_level("warn"), Level::WARN);
        assert_eq!(parse_log_level("loud"), Level::INFO);
    }
}
