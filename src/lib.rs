//! StepFlow conversational engine
//!
//! Walks an ordered list of question/answer steps, collects one answer per step
//! through a pluggable interaction port, and supports sequential advance, named
//! jumps and single-step back navigation.

pub mod config;
pub mod flow;
pub mod ports;
pub mod scenarios;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{StepFlowError, Result};

// Re-export main components for easy access
pub use flow::{
    AnswerStore, ControlResolver, Controls, FlowRunner, InteractionPort, RunReport, RunStatus,
    StepContext, StepProvider, StepRegistry, StepResponse,
};
pub use ports::ConsolePort;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
