//! Step declarations
//!
//! A step is a named two-mode function. Called without input it renders a
//! prompt; called with the collected answer it commits and may request a jump.
//! Applications declare their steps in order through [`StepProvider::builder`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::utils::errors::{StepFlowError, Result};
use super::answers::AnswerStore;
use super::controls::Controls;
use super::registry::StepRegistry;

/// What a step returns from either mode
#[derive(Debug, Clone, Default)]
pub struct StepResponse {
    /// Text shown to the user
    pub output: Option<String>,
    /// Interaction requested to collect the answer
    pub controls: Option<Controls>,
    /// Jump token for the step to run next
    pub next_command: Option<String>,
}

impl StepResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn with_next_command(mut self, token: impl Into<String>) -> Self {
        self.next_command = Some(token.into());
        self
    }

    /// Whether the response asks for any interaction
    pub fn has_controls(&self) -> bool {
        self.controls.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Output text, empty when the step gave none
    pub fn output_text(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }
}

/// What a step can reach while it runs
pub struct StepContext<'a> {
    step_id: &'a str,
    answers: &'a mut AnswerStore,
    registry: &'a StepRegistry,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(step_id: &'a str, answers: &'a mut AnswerStore, registry: &'a StepRegistry) -> Self {
        Self { step_id, answers, registry }
    }

    /// Identifier of the step being invoked
    pub fn step_id(&self) -> &str {
        self.step_id
    }

    /// Stored answer for any step, or `default`
    pub fn answer(&self, step_id: &str, default: &str) -> String {
        self.answers.get(step_id, default)
    }

    /// Stored answer for the current step, or `default`
    pub fn own_answer(&self, default: &str) -> String {
        self.answers.get(self.step_id, default)
    }

    pub fn set_answer(&mut self, step_id: &str, value: impl Into<String>) {
        self.answers.set(step_id, value);
    }

    /// Jump token for a registered step
    ///
    /// Fails with [`StepFlowError::UnknownStep`] for an unregistered id.
    pub fn jump_to(&self, step_id: &str) -> Result<String> {
        self.registry.jump_token(step_id)
    }

    pub fn answers(&self) -> &AnswerStore {
        &*self.answers
    }
}

/// Step function signature shared by render and commit calls
pub type StepFn = Arc<dyn Fn(&mut StepContext<'_>, Option<&str>) -> Result<StepResponse> + Send + Sync>;

/// A named step
#[derive(Clone)]
pub struct StepDescriptor {
    id: String,
    handler: StepFn,
}

impl StepDescriptor {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Render call: no input, produces a prompt
    pub fn render(&self, ctx: &mut StepContext<'_>) -> Result<StepResponse> {
        (self.handler)(ctx, None)
    }

    /// Commit call: consumes the collected answer
    pub fn commit(&self, ctx: &mut StepContext<'_>, answer: &str) -> Result<StepResponse> {
        (self.handler)(ctx, Some(answer))
    }
}

impl fmt::Debug for StepDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Ordered set of steps making up one conversation
#[derive(Debug, Clone)]
pub struct StepProvider {
    name: String,
    steps: Vec<StepDescriptor>,
}

impl StepProvider {
    /// Start declaring steps for a named conversation
    pub fn builder(name: impl Into<String>) -> StepProviderBuilder {
        StepProviderBuilder {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps in declaration order
    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Builder collecting steps in declaration order
pub struct StepProviderBuilder {
    name: String,
    steps: Vec<StepDescriptor>,
}

impl StepProviderBuilder {
    /// Append a step
    pub fn step<F>(mut self, id: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut StepContext<'_>, Option<&str>) -> Result<StepResponse> + Send + Sync + 'static,
    {
        self.steps.push(StepDescriptor {
            id: id.into(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Finish the declaration, rejecting blank or repeated identifiers
    pub fn build(self) -> Result<StepProvider> {
        let mut seen = HashSet::new();
        for step in &self.steps {
            if step.id.trim().is_empty() {
                return Err(StepFlowError::Config(format!(
                    "Step identifiers in \"{}\" cannot be blank",
                    self.name
                )));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(StepFlowError::DuplicateStep { step_id: step.id.clone() });
            }
        }

        Ok(StepProvider {
            name: self.name,
            steps: self.steps,
        })
    }
}
