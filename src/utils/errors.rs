//! Error handling for StepFlow
//!
//! This module defines the main error type used throughout the engine
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for StepFlow
#[derive(Error, Debug)]
pub enum StepFlowError {
    #[error("Unknown step: \"{step_id}\"")]
    UnknownStep { step_id: String },

    #[error("Duplicate step: \"{step_id}\"")]
    DuplicateStep { step_id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Interaction failed: {0}")]
    Interaction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for StepFlow operations
pub type Result<T> = std::result::Result<T, StepFlowError>;

impl StepFlowError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StepFlowError::UnknownStep { .. } => false,
            StepFlowError::DuplicateStep { .. } => false,
            StepFlowError::Config(_) => false,
            StepFlowError::ConfigLoad(_) => false,
            StepFlowError::Interaction(_) => true,
            StepFlowError::Serialization(_) => false,
            StepFlowError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StepFlowError::UnknownStep { .. } => ErrorSeverity::Critical,
            StepFlowError::DuplicateStep { .. } => ErrorSeverity::Critical,
            StepFlowError::Config(_) => ErrorSeverity::Critical,
            StepFlowError::ConfigLoad(_) => ErrorSeverity::Critical,
            StepFlowError::Interaction(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error stems from how steps or settings were declared
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StepFlowError::UnknownStep { .. }
                | StepFlowError::DuplicateStep { .. }
                | StepFlowError::Config(_)
                | StepFlowError::ConfigLoad(_)
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
