//! Per-run answer storage
//!
//! Holds the most recent answer for each step of a single run. Nothing here
//! outlives the run that created it.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Most recent answer per step identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<String, String>,
}

impl AnswerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stored answer for `step_id`, or `default` when the step has none
    ///
    /// An empty stored answer is still an answer and is returned as-is.
    pub fn get(&self, step_id: &str, default: &str) -> String {
        self.answers
            .get(step_id)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Store an answer, replacing any previous one
    pub fn set(&mut self, step_id: &str, value: impl Into<String>) {
        self.answers.insert(step_id.to_string(), value.into());
    }

    /// Whether `step_id` has an answer
    pub fn contains(&self, step_id: &str) -> bool {
        self.answers.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate over `(step_id, answer)` pairs ordered by step id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_default_for_untouched_key() {
        let store = AnswerStore::new();
        assert_eq!(store.get("ask_name", "unknown"), "unknown");
        assert!(!store.contains("ask_name"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_then_get_ignores_default() {
        let mut store = AnswerStore::new();
        store.set("ask_name", "Alice");
        assert_eq!(store.get("ask_name", ""), "Alice");
        assert_eq!(store.get("ask_name", "Bob"), "Alice");
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = AnswerStore::new();
        store.set("ask_name", "Alice");
        store.set("ask_name", "Carol");
        assert_eq!(store.get("ask_name", ""), "Carol");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_answer_is_kept() {
        let mut store = AnswerStore::new();
        store.set("ask_name", "");
        assert_eq!(store.get("ask_name", "fallback"), "");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut store = AnswerStore::new();
        store.set("b", "2");
        store.set("a", "1");
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
        let pairs: Vec<_> = store.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
