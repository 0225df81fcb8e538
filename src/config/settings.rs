//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub flow: FlowConfig,
    pub console: ConsoleConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for a daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Flow runner configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Include collected answer text in debug logs
    pub log_answers: bool,
}

/// Console interaction port configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Wait for Enter after an alert before moving on
    pub acknowledge_alerts: bool,
    pub prompt_marker: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load settings from the named file (extension optional) and environment variables
    pub fn load_from(file_name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file_name).required(false))
            .add_source(
                config::Environment::with_prefix("STEPFLOW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StepFlowError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            flow: FlowConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            acknowledge_alerts: true,
            prompt_marker: "> ".to_string(),
        }
    }
}
