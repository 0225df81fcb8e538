//! Interaction controls and their resolution
//!
//! A step asks for input by attaching [`Controls`] to its render response: a
//! map from [`ControlKind`] to the [`InteractionBinding`] describing how to ask.
//! The [`ControlResolver`] picks the binding to run from a fixed dispatch table
//! and drives it through the injected [`InteractionPort`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::errors::Result;
use super::step::StepResponse;
use super::tokens::RESULT_OK;

/// Category of UI primitive a prompt requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlKind {
    Radiogroup,
    Input,
    Alert,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Radiogroup => "Radiogroup",
            ControlKind::Input => "Input",
            ControlKind::Alert => "Alert",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to collect an answer for one interaction kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionBinding {
    /// One-way acknowledgement; answers [`RESULT_OK`]
    Alert,
    /// Free-form text seeded with a default
    Input { default: String },
    /// Choice among option labels; the labels are advisory
    Radiogroup { default: String, options: Vec<String> },
}

impl InteractionBinding {
    pub fn kind(&self) -> ControlKind {
        match self {
            InteractionBinding::Alert => ControlKind::Alert,
            InteractionBinding::Input { .. } => ControlKind::Input,
            InteractionBinding::Radiogroup { .. } => ControlKind::Radiogroup,
        }
    }

    /// Perform the interaction and return the raw answer
    pub async fn invoke(&self, port: &dyn InteractionPort, response: &StepResponse) -> Result<String> {
        let message = response.output_text();
        match self {
            InteractionBinding::Alert => {
                port.notify(message).await?;
                Ok(RESULT_OK.to_string())
            }
            InteractionBinding::Input { default } => port.prompt_text(message, default).await,
            InteractionBinding::Radiogroup { default, options } => {
                port.prompt_choice(message, options, default).await
            }
        }
    }
}

/// Interactions requested by a step response, at most one per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    bindings: BTreeMap<ControlKind, InteractionBinding>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alert() -> Self {
        Self::single(InteractionBinding::Alert)
    }

    pub fn input(default: impl Into<String>) -> Self {
        Self::single(InteractionBinding::Input { default: default.into() })
    }

    pub fn radiogroup<I, S>(default: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::single(InteractionBinding::Radiogroup {
            default: default.into(),
            options: options.into_iter().map(Into::into).collect(),
        })
    }

    fn single(binding: InteractionBinding) -> Self {
        let mut controls = Self::new();
        controls.insert(binding);
        controls
    }

    /// Add a binding, replacing any binding of the same kind
    pub fn insert(&mut self, binding: InteractionBinding) {
        self.bindings.insert(binding.kind(), binding);
    }

    /// Merge another set of controls into this one; `other` wins per kind
    pub fn with(mut self, other: Controls) -> Self {
        self.bindings.extend(other.bindings);
        self
    }

    pub fn contains(&self, kind: ControlKind) -> bool {
        self.bindings.contains_key(&kind)
    }

    pub fn get(&self, kind: ControlKind) -> Option<&InteractionBinding> {
        self.bindings.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ControlKind> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// UI primitives provided by the hosting environment
#[async_trait]
pub trait InteractionPort: Send + Sync {
    /// Show a message and wait for acknowledgement
    async fn notify(&self, message: &str) -> Result<()>;

    /// Ask for free-form text
    async fn prompt_text(&self, message: &str, default: &str) -> Result<String>;

    /// Ask for one of `options`; implementations may return any text
    async fn prompt_choice(&self, message: &str, options: &[String], default: &str) -> Result<String>;
}

struct DispatchEntry {
    kind: ControlKind,
    matches: fn(&StepResponse) -> bool,
}

/// Resolution order when a response carries several kinds. Not a contract.
const DISPATCH_TABLE: [DispatchEntry; 3] = [
    DispatchEntry { kind: ControlKind::Radiogroup, matches: ControlResolver::is_radiogroup },
    DispatchEntry { kind: ControlKind::Input, matches: ControlResolver::is_input },
    DispatchEntry { kind: ControlKind::Alert, matches: ControlResolver::is_alert },
];

/// Runs the interaction a step response asks for
#[derive(Clone)]
pub struct ControlResolver {
    port: Arc<dyn InteractionPort>,
}

impl ControlResolver {
    pub fn new(port: Arc<dyn InteractionPort>) -> Self {
        Self { port }
    }

    pub fn is_alert(response: &StepResponse) -> bool {
        Self::has_kind(response, ControlKind::Alert)
    }

    pub fn is_input(response: &StepResponse) -> bool {
        Self::has_kind(response, ControlKind::Input)
    }

    pub fn is_radiogroup(response: &StepResponse) -> bool {
        Self::has_kind(response, ControlKind::Radiogroup)
    }

    pub fn create_alert() -> Controls {
        Controls::alert()
    }

    pub fn create_input(default: impl Into<String>) -> Controls {
        Controls::input(default)
    }

    pub fn create_radiogroup<I, S>(default: impl Into<String>, options: I) -> Controls
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Controls::radiogroup(default, options)
    }

    fn has_kind(response: &StepResponse, kind: ControlKind) -> bool {
        response.controls.as_ref().is_some_and(|c| c.contains(kind))
    }

    /// First kind in dispatch order present on the response
    pub fn matching_kind(response: &StepResponse) -> Option<ControlKind> {
        DISPATCH_TABLE
            .iter()
            .find(|entry| (entry.matches)(response))
            .map(|entry| entry.kind)
    }

    /// Collect an answer for the response
    ///
    /// Returns `Ok(None)` when no known kind matches; the caller must not advance.
    pub async fn resolve(&self, response: &StepResponse) -> Result<Option<String>> {
        let Some(kind) = Self::matching_kind(response) else {
            return Ok(None);
        };
        let Some(binding) = response.controls.as_ref().and_then(|c| c.get(kind)) else {
            return Ok(None);
        };

        debug!(kind = %kind, "Invoking interaction binding");
        let answer = binding.invoke(self.port.as_ref(), response).await?;
        Ok(Some(answer))
    }
}

impl fmt::Debug for ControlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakePort {
        calls: Mutex<Vec<String>>,
        reply: String,
    }

    impl FakePort {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), reply: reply.to_string() })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InteractionPort for FakePort {
        async fn notify(&self, message: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("notify:{}", message));
            Ok(())
        }

        async fn prompt_text(&self, message: &str, default: &str) -> Result<String> {
            self.calls.lock().unwrap().push(format!("text:{}:{}", message, default));
            Ok(self.reply.clone())
        }

        async fn prompt_choice(&self, message: &str, options: &[String], default: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("choice:{}:{}:{}", message, options.join("|"), default));
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_predicates() {
        let response = StepResponse::new().with_controls(Controls::input(""));
        assert!(ControlResolver::is_input(&response));
        assert!(!ControlResolver::is_alert(&response));
        assert!(!ControlResolver::is_radiogroup(&response));
        assert!(!ControlResolver::is_input(&StepResponse::new()));
    }

    #[test]
    fn test_merge_keeps_one_binding_per_kind() {
        let controls = Controls::input("a").with(Controls::input("b")).with(Controls::alert());
        assert_eq!(controls.len(), 2);
        assert_eq!(
            controls.get(ControlKind::Input),
            Some(&InteractionBinding::Input { default: "b".to_string() })
        );
    }

    #[test]
    fn test_dispatch_order_prefers_radiogroup() {
        let controls = Controls::input("").with(Controls::radiogroup("", ["Male", "Female"]));
        let response = StepResponse::new().with_controls(controls);
        assert_eq!(ControlResolver::matching_kind(&response), Some(ControlKind::Radiogroup));
    }

    #[tokio::test]
    async fn test_resolve_input() {
        let port = FakePort::replying("Alice");
        let resolver = ControlResolver::new(port.clone());
        let response = StepResponse::new()
            .with_output("Tell me your name")
            .with_controls(ControlResolver::create_input("Bob"));

        let answer = resolver.resolve(&response).await.unwrap();
        assert_eq!(answer.as_deref(), Some("Alice"));
        assert_eq!(port.calls(), vec!["text:Tell me your name:Bob"]);
    }

    #[tokio::test]
    async fn test_resolve_radiogroup_passes_options() {
        let port = FakePort::replying("Robot");
        let resolver = ControlResolver::new(port.clone());
        let response = StepResponse::new()
            .with_output("Gender")
            .with_controls(ControlResolver::create_radiogroup("", vec!["Male", "Female"]));

        let answer = resolver.resolve(&response).await.unwrap();
        assert_eq!(answer.as_deref(), Some("Robot"));
        assert_eq!(port.calls(), vec!["choice:Gender:Male|Female:"]);
    }

    #[tokio::test]
    async fn test_resolve_alert_answers_ok() {
        let port = FakePort::replying("ignored");
        let resolver = ControlResolver::new(port.clone());
        let response = StepResponse::new()
            .with_output("Bye")
            .with_controls(ControlResolver::create_alert());

        let answer = resolver.resolve(&response).await.unwrap();
        assert_eq!(answer.as_deref(), Some(RESULT_OK));
        assert_eq!(port.calls(), vec!["notify:Bye"]);
    }

    #[tokio::test]
    async fn test_resolve_without_controls_yields_nothing() {
        let port = FakePort::replying("x");
        let resolver = ControlResolver::new(port.clone());

        assert_eq!(resolver.resolve(&StepResponse::new()).await.unwrap(), None);
        assert!(port.calls().is_empty());
    }
}
