//! Shared types and wire format for agentplan.
//!
//! Everything here is plain data: the facts and parameters that flow into a
//! resolution, and the typed actions and plans that flow out of it. The
//! decision logic lives in `agentplan-core`.

pub mod action;
pub mod arch;
pub mod facts;
pub mod hash;
pub mod params;
pub mod plan;
pub mod types;

// Re-exports
pub use action::{Action, ActionId, FailurePolicy, PlannedAction, Provider};
pub use arch::Arch;
pub use facts::{BuildCoordinates, HostFacts, OsFamily};
pub use hash::Sha256Digest;
pub use params::Parameters;
pub use plan::{ActionPlan, PlanOrderError};
pub use types::{PackageName, Version};
