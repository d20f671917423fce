//! Platform resolution and install-plan generation.
//!
//! Given a host's facts, the build coordinates of the compiling server and
//! the deployment parameters, [`resolve`] computes the ordered set of actions
//! that installs the agent package at an exact version:
//!
//! ```text
//! HostFacts ─► PlatformDescriptor ─► support matrix ─┬─► ArtifactSpec
//!                                                     ├─► TrustPlan
//!                                                     └─► RepositoryPlan
//!                                                            │
//!                                        ActionPlan ◄────────┘ ─► Executor
//! ```
//!
//! Resolution is pure: no I/O, no global state, and the same inputs always
//! give a byte-identical plan. Applying the plan is an [`Executor`]'s job.
//!
//! # Example
//!
//! ```
//! use agentplan_core::resolve;
//! use agentplan_schema::{BuildCoordinates, HostFacts, OsFamily, Parameters};
//!
//! let facts = HostFacts {
//!     family: OsFamily::Suse,
//!     distro: "SLES".into(),
//!     major_release: "12".into(),
//!     architecture: "x64".into(),
//!     managed: true,
//! };
//! let coords = BuildCoordinates::new("master.example.vm", "2000.0.0", "foo.example.vm");
//! let plan = resolve(&facts, &coords, &Parameters::for_version("1.10.100")).unwrap();
//! assert_eq!(plan.actions().last().unwrap().id.as_str(), "package[puppet-agent]");
//! ```

pub mod artifact;
pub mod assembler;
pub mod error;
pub mod executor;
pub mod inventory;
pub mod matrix;
pub mod params;
pub mod paths;
pub mod platform;
pub mod repository;
pub mod trust;

pub use artifact::ArtifactSpec;
pub use assembler::{Resolution, check_platform, resolve, resolve_detailed};
pub use error::PlanError;
pub use executor::{Executor, NullExecutor, RecordingExecutor, apply};
pub use inventory::{BuildCoordinator, FactSnapshot, HostInventory};
pub use matrix::{InstallMethod, PlatformVariant, SupportedPlatform};
pub use platform::PlatformDescriptor;
pub use repository::RepositoryPlan;
pub use trust::TrustPlan;

use agentplan_schema::Parameters;

/// Resolve using the collaborator traits instead of plain values.
///
/// # Errors
///
/// Returns the first error raised by the inventory, the coordinator or the
/// resolution itself.
pub fn resolve_with(
    inventory: &dyn HostInventory,
    coordinator: &dyn BuildCoordinator,
    params: &Parameters,
) -> Result<Resolution, PlanError> {
    let facts = inventory.host_facts()?;
    let coords = coordinator.build_coordinates()?;
    resolve_detailed(&facts, &coords, params)
}
