//! Conversational flow engine
//!
//! This module holds the step registry, the per-run answer store, the control
//! resolver and the runner that walks a step provider to completion.

pub mod answers;
pub mod controls;
pub mod registry;
pub mod runner;
pub mod step;
pub mod tokens;

// Re-export commonly used flow components
pub use answers::AnswerStore;
pub use controls::{ControlKind, ControlResolver, Controls, InteractionBinding, InteractionPort};
pub use registry::StepRegistry;
pub use runner::{next_index, FlowRunner, RunReport, RunStatus, StepOutcome};
pub use step::{StepContext, StepDescriptor, StepProvider, StepProviderBuilder, StepResponse};
pub use tokens::{RESULT_BACK, RESULT_NEXT, RESULT_OK};
