//! Flow runner state machine
//!
//! Walks the provider's steps from index 0. Each iteration renders the current
//! step, collects an answer when the step asks for one, commits it and moves the
//! index. The run ends when the index leaves `[0, step_count)`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::FlowConfig;
use crate::utils::errors::Result;
use crate::utils::logging;
use super::answers::AnswerStore;
use super::controls::{ControlResolver, InteractionPort};
use super::registry::StepRegistry;
use super::step::{StepContext, StepProvider, StepResponse};
use super::tokens;

/// How one iteration ended, as seen by the index computation
#[derive(Debug, Clone, Copy)]
pub enum StepOutcome<'a> {
    /// The render response asked for no interaction
    SelfTerminated,
    /// The collected answer was the back sentinel
    Back,
    /// The step was committed and returned this response
    Committed(&'a StepResponse),
}

impl StepOutcome<'_> {
    fn label(&self) -> &'static str {
        match self {
            StepOutcome::SelfTerminated => "no_controls",
            StepOutcome::Back => "back",
            StepOutcome::Committed(_) => "commit",
        }
    }
}

/// Index of the next step to run
///
/// `None` means the run stepped back before the first step. A committed
/// response jumps when its `next_command` names a registered step and
/// otherwise advances by one; the caller detects running past the end.
pub fn next_index(current: usize, outcome: StepOutcome<'_>, registry: &StepRegistry) -> Option<usize> {
    match outcome {
        StepOutcome::SelfTerminated => Some(current + 1),
        StepOutcome::Back => current.checked_sub(1),
        StepOutcome::Committed(response) => Some(
            response
                .next_command
                .as_deref()
                .and_then(|token| registry.resolve_token(token))
                .unwrap_or(current + 1),
        ),
    }
}

/// Final state of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Advanced past the last step
    Finished,
    /// Stepped back from the first step
    Rewound,
    /// A step asked for controls no interaction kind could serve
    Stalled { step_id: String },
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Finished => "finished",
            RunStatus::Rewound => "rewound",
            RunStatus::Stalled { .. } => "stalled",
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub provider: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub status: RunStatus,
    /// Number of render calls made
    pub iterations: usize,
    pub answers: AnswerStore,
}

/// Drives one run of a step provider
#[derive(Debug)]
pub struct FlowRunner {
    provider: StepProvider,
    registry: StepRegistry,
    resolver: ControlResolver,
    answers: AnswerStore,
    config: FlowConfig,
}

impl FlowRunner {
    /// Create a runner over `provider`, collecting answers through `port`
    pub fn new(provider: StepProvider, port: Arc<dyn InteractionPort>) -> Self {
        let registry = StepRegistry::discover(&provider);
        Self {
            provider,
            registry,
            resolver: ControlResolver::new(port),
            answers: AnswerStore::new(),
            config: FlowConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Run the conversation to completion
    ///
    /// Errors raised by a step (for example a jump to an unknown step) or by the
    /// interaction port end the run immediately.
    pub async fn run(mut self) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let run_label = run_id.to_string();
        let started_at = Utc::now();
        info!(
            run_id = %run_label,
            provider = self.provider.name(),
            steps = self.registry.len(),
            "Flow run started"
        );

        let mut index = 0usize;
        let mut iterations = 0usize;

        let status = loop {
            let Some(step) = self.provider.get(index) else {
                break RunStatus::Finished;
            };
            let step_id = step.id();
            iterations += 1;

            let response = {
                let mut ctx = StepContext::new(step_id, &mut self.answers, &self.registry);
                step.render(&mut ctx)?
            };
            logging::log_step_rendered(&run_label, step_id, index, response.has_controls());

            let next = if !response.has_controls() {
                self.transition(&run_label, step_id, index, StepOutcome::SelfTerminated)
            } else {
                let Some(answer) = self.resolver.resolve(&response).await? else {
                    logging::log_stall(&run_label, step_id, index);
                    break RunStatus::Stalled { step_id: step_id.to_string() };
                };
                logging::log_answer_collected(&run_label, step_id, &answer, self.config.log_answers);

                if tokens::is_back(&answer) {
                    self.transition(&run_label, step_id, index, StepOutcome::Back)
                } else {
                    self.answers.set(step_id, answer.as_str());
                    let committed = {
                        let mut ctx = StepContext::new(step_id, &mut self.answers, &self.registry);
                        step.commit(&mut ctx, &answer)?
                    };
                    self.transition(&run_label, step_id, index, StepOutcome::Committed(&committed))
                }
            };

            match next {
                Some(next) => index = next,
                None => break RunStatus::Rewound,
            }
        };

        let finished_at = Utc::now();
        logging::log_run_finished(
            &run_label,
            status.as_str(),
            iterations,
            (finished_at - started_at).num_milliseconds(),
        );

        Ok(RunReport {
            run_id,
            provider: self.provider.name().to_string(),
            started_at,
            finished_at,
            status,
            iterations,
            answers: self.answers,
        })
    }

    fn transition(&self, run_id: &str, step_id: &str, index: usize, outcome: StepOutcome<'_>) -> Option<usize> {
        let next = next_index(index, outcome, &self.registry);
        logging::log_transition(run_id, step_id, index, next, outcome.label());
        next
    }
}
