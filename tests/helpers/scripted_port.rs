//! Scripted interaction port for testing
//!
//! Answers prompts from a fixed queue and records every port call so tests can
//! assert on exactly what a run asked the user.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stepflow::{InteractionPort, Result, StepFlowError};

/// One call made against the port
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortCall {
    Notify(String),
    PromptText { message: String, default: String },
    PromptChoice { message: String, options: Vec<String>, default: String },
}

/// Port answering from a predetermined script
#[derive(Debug, Default)]
pub struct ScriptedPort {
    answers: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<PortCall>>,
}

impl ScriptedPort {
    /// Create a port that will answer prompts with `answers`, in order
    pub fn new(answers: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// All calls recorded so far
    pub fn calls(&self) -> Vec<PortCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Messages passed to `notify`
    pub fn notifications(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PortCall::Notify(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Answers not consumed by the run
    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn record(&self, call: PortCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_answer(&self) -> Result<String> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| StepFlowError::Interaction("scripted answers exhausted".to_string()))
    }
}

#[async_trait]
impl InteractionPort for ScriptedPort {
    async fn notify(&self, message: &str) -> Result<()> {
        self.record(PortCall::Notify(message.to_string()));
        Ok(())
    }

    async fn prompt_text(&self, message: &str, default: &str) -> Result<String> {
        self.record(PortCall::PromptText {
            message: message.to_string(),
            default: default.to_string(),
        });
        self.next_answer()
    }

    async fn prompt_choice(&self, message: &str, options: &[String], default: &str) -> Result<String> {
        self.record(PortCall::PromptChoice {
            message: message.to_string(),
            options: options.to_vec(),
            default: default.to_string(),
        });
        self.next_answer()
    }
}

/// Shorthand for an expected text prompt
pub fn text_prompt(message: &str, default: &str) -> PortCall {
    PortCall::PromptText {
        message: message.to_string(),
        default: default.to_string(),
    }
}
