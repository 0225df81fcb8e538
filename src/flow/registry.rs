//! Step ordering and jump token resolution

use std::collections::HashMap;

use crate::utils::errors::{StepFlowError, Result};
use super::step::StepProvider;
use super::tokens;

/// Ordered step identifiers of one provider
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl StepRegistry {
    /// Collect the provider's step identifiers in declaration order
    pub fn discover(provider: &StepProvider) -> Self {
        let ids: Vec<String> = provider.steps().iter().map(|s| s.id().to_string()).collect();
        let positions = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index))
            .collect();

        Self { ids, positions }
    }

    /// Step identifiers in run order
    pub fn step_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn index_of(&self, step_id: &str) -> Option<usize> {
        self.positions.get(step_id).copied()
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Build a jump token for a registered step
    pub fn jump_token(&self, step_id: &str) -> Result<String> {
        if self.positions.contains_key(step_id) {
            Ok(tokens::encode_jump(step_id))
        } else {
            Err(StepFlowError::UnknownStep { step_id: step_id.to_string() })
        }
    }

    /// Map a jump token to its target index
    ///
    /// Malformed tokens and unknown targets resolve to `None`.
    pub fn resolve_token(&self, token: &str) -> Option<usize> {
        tokens::parse_jump(token).and_then(|id| self.index_of(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
