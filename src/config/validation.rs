//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{StepFlowError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_logging_config(&settings.logging)?;
    validate_console_config(&settings.console)?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(StepFlowError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(StepFlowError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if let Some(path) = &config.file_path {
        if path.trim().is_empty() {
            return Err(StepFlowError::Config(
                "Log file path cannot be blank".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate console configuration
fn validate_console_config(config: &super::ConsoleConfig) -> Result<()> {
    if config.prompt_marker.contains('\n') {
        return Err(StepFlowError::Config(
            "Prompt marker must fit on a single line".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(StepFlowError::Config(_)));
    }

    #[test]
    fn test_rejects_blank_log_path() {
        let mut settings = Settings::default();
        settings.logging.file_path = Some("  ".to_string());
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_multiline_prompt_marker() {
        let mut settings = Settings::default();
        settings.console.prompt_marker = ">\n".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
