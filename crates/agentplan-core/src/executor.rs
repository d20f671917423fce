//! Executor trait for dependency injection
//!
//! The core never touches a live system. It hands each planned action, in
//! order, to an executor that owns convergence.

use agentplan_schema::{ActionPlan, PlannedAction};
use anyhow::{Context, Result};
use std::sync::Mutex;

/// Converges one action at a time.
///
/// Implementations must be idempotent per action: applying an action whose
/// end state already holds is a no-op.
pub trait Executor: Send + Sync {
    /// Converge a single action.
    ///
    /// # Errors
    ///
    /// Returns an error if the action could not be brought to its end state.
    fn execute(&self, action: &PlannedAction) -> Result<()>;
}

impl<T: Executor + ?Sized> Executor for std::sync::Arc<T> {
    fn execute(&self, action: &PlannedAction) -> Result<()> {
        (**self).execute(action)
    }
}

/// Hand a plan to an executor, front to back.
///
/// The plan's ordering is checked before anything is executed, so a plan
/// with a dangling dependency never starts.
///
/// # Errors
///
/// Returns an error if the plan's ordering is invalid or if the executor
/// fails; execution stops at the first failing action.
pub fn apply(plan: &ActionPlan, executor: &dyn Executor) -> Result<()> {
    plan.validate_order().context("Refusing to apply plan")?;

    for action in plan {
        tracing::debug!(id = %action.id, "Applying action");
        executor
            .execute(action)
            .with_context(|| format!("Failed to apply {}", action.id))?;
    }
    Ok(())
}

/// Discards every action (e.g., validation only).
#[derive(Debug, Clone, Copy)]
pub struct NullExecutor;

impl Executor for NullExecutor {
    fn execute(&self, _: &PlannedAction) -> Result<()> {
        Ok(())
    }
}

/// Records the actions it is handed, in order. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    applied: Mutex<Vec<PlannedAction>>,
}

impl RecordingExecutor {
    /// An executor with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything executed so far.
    pub fn applied(&self) -> Vec<PlannedAction> {
        match self.applied.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Executor for RecordingExecutor {
    fn execute(&self, action: &PlannedAction) -> Result<()> {
        self.applied
            .lock()
            .map_err(|_| anyhow::anyhow!("Recording executor lock poisoned"))?
            .push(action.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentplan_schema::{Action, ActionId};

    fn dir(path: &str) -> PlannedAction {
        PlannedAction::new(Action::EnsureDirectory {
            path: path.to_string(),
            mode: None,
        })
    }

    struct FailOn(ActionId);

    impl Executor for FailOn {
        fn execute(&self, action: &PlannedAction) -> Result<()> {
            if action.id == self.0 {
                anyhow::bail!("boom");
            }
            Ok(())
        }
    }

    #[test]
    fn test_records_in_order() {
        let mut plan = ActionPlan::new();
        plan.push(dir("/a"));
        plan.push(dir("/a/b").requires(ActionId::new("directory", "/a")));

        let recorder = RecordingExecutor::new();
        apply(&plan, &recorder).unwrap();
        assert_eq!(recorder.applied(), plan.actions());
    }

    #[test]
    fn test_bad_order_never_starts() {
        let mut plan = ActionPlan::new();
        plan.push(dir("/a/b").requires(ActionId::new("directory", "/a")));
        plan.push(dir("/a"));

        let recorder = RecordingExecutor::new();
        assert!(apply(&plan, &recorder).is_err());
        assert!(recorder.applied().is_empty());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let mut plan = ActionPlan::new();
        plan.push(dir("/a"));
        plan.push(dir("/b"));

        let err = apply(&plan, &FailOn(ActionId::new("directory", "/a"))).unwrap_err();
        assert!(format!("{err:#}").contains("directory[/a]"));
    }

    #[test]
    fn test_null_executor() {
        let mut plan = ActionPlan::new();
        plan.push(dir("/a"));
        assert!(apply(&plan, &NullExecutor).is_ok());
    }
}
