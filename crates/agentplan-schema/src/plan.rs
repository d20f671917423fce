//! The ordered action plan returned by a resolution.

use crate::action::{ActionId, PlannedAction};
use crate::hash::Sha256Digest;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors found when checking a plan's ordering.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanOrderError {
    /// Two actions declare the same resource.
    #[error("Duplicate action: {0}")]
    Duplicate(ActionId),

    /// An action requires something that is not earlier in the plan.
    #[error("{action} requires {missing}, which does not precede it")]
    UnresolvedDependency {
        /// The action with the dangling dependency.
        action: ActionId,
        /// The dependency that was not found before it.
        missing: ActionId,
    },
}

/// Ordered list of actions. Executors must apply them front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    actions: Vec<PlannedAction>,
}

impl ActionPlan {
    /// An empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn push(&mut self, action: PlannedAction) {
        self.actions.push(action);
    }

    /// Append several actions, keeping their order.
    pub fn extend(&mut self, actions: impl IntoIterator<Item = PlannedAction>) {
        self.actions.extend(actions);
    }

    /// Actions in apply order.
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    /// Iterate in apply order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlannedAction> {
        self.actions.iter()
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when the plan declares nothing.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Look an action up by id.
    pub fn get(&self, id: &ActionId) -> Option<&PlannedAction> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// True when an action with this id is in the plan.
    pub fn contains(&self, id: &ActionId) -> bool {
        self.get(id).is_some()
    }

    /// Position of an action in apply order.
    pub fn position(&self, id: &ActionId) -> Option<usize> {
        self.actions.iter().position(|a| &a.id == id)
    }

    /// Check that ids are unique and every dependency precedes its dependent.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanOrderError`] found, scanning front to back.
    pub fn validate_order(&self) -> Result<(), PlanOrderError> {
        let mut seen: HashSet<&ActionId> = HashSet::new();
        for planned in &self.actions {
            for dep in &planned.requires {
                if !seen.contains(dep) {
                    return Err(PlanOrderError::UnresolvedDependency {
                        action: planned.id.clone(),
                        missing: dep.clone(),
                    });
                }
            }
            if !seen.insert(&planned.id) {
                return Err(PlanOrderError::Duplicate(planned.id.clone()));
            }
        }
        Ok(())
    }

    /// Canonical JSON form. Equal plans produce identical bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// SHA-256 over [`to_canonical_json`](Self::to_canonical_json).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn digest(&self) -> Result<Sha256Digest, serde_json::Error> {
        Ok(Sha256Digest::of(&self.to_canonical_json()?))
    }
}

impl<'a> IntoIterator for &'a ActionPlan {
    type Item = &'a PlannedAction;
    type IntoIter = std::slice::Iter<'a, PlannedAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
