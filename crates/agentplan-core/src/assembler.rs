//! Composes the planners into one ordered plan.
//!
//! Resolution is a single pass with no side effects: parameters are checked,
//! the platform is normalized and validated, then each planner contributes
//! its actions. The first error ends the pass and no partial plan escapes.

use crate::artifact::ArtifactSpec;
use crate::error::PlanError;
use crate::matrix::{self, InstallMethod, SupportedPlatform};
use crate::params::{build_coordinates, package_version};
use crate::paths;
use crate::platform::PlatformDescriptor;
use crate::repository::RepositoryPlan;
use crate::trust::TrustPlan;
use agentplan_schema::{
    Action, ActionPlan, BuildCoordinates, HostFacts, PackageName, Parameters, PlannedAction,
};
use serde::Serialize;

/// Everything a resolution decided, along with the resulting plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Normalized platform.
    pub descriptor: PlatformDescriptor,
    /// Matched support-matrix record.
    pub platform: SupportedPlatform,
    /// Package artifact for this platform and version.
    pub artifact: ArtifactSpec,
    /// Key material, for repository installs.
    pub trust: Option<TrustPlan>,
    /// Repository definition, for repository installs.
    pub repository: Option<RepositoryPlan>,
    /// The ordered actions.
    pub plan: ActionPlan,
}

/// Resolve a plan, keeping the intermediate records.
///
/// # Errors
///
/// Returns [`PlanError::MissingParameter`] or [`PlanError::InvalidParameter`]
/// for a bad `package_version` or blank build coordinates, and
/// [`PlanError::UnsupportedPlatform`] when the host is outside the support
/// matrix.
pub fn resolve_detailed(
    facts: &HostFacts,
    coords: &BuildCoordinates,
    params: &Parameters,
) -> Result<Resolution, PlanError> {
    let version = package_version(params)?;
    build_coordinates(coords)?;
    let descriptor = PlatformDescriptor::from_facts(facts);
    let platform = matrix::lookup(&descriptor, facts.managed)?;
    let artifact = ArtifactSpec::resolve(&platform, &descriptor, version, coords);

    let (trust, repository) = match platform.install_method {
        InstallMethod::StagedRpm => (None, None),
        InstallMethod::Repository => (
            Some(TrustPlan::new(params.manage_pki_dir)),
            Some(RepositoryPlan::new(params.manage_repo, &descriptor, coords)),
        ),
    };

    let mut plan = ActionPlan::new();
    let mut package_requires = Vec::new();

    if let Some(trust) = &trust {
        let actions = trust.actions();
        package_requires.extend(
            actions
                .iter()
                .filter(|a| matches!(a.action, Action::RunCommandUnless { .. }))
                .map(|a| a.id.clone()),
        );
        plan.extend(actions);
    }
    if let Some(repository) = &repository {
        let actions = repository.actions();
        package_requires.extend(actions.iter().map(|a| a.id.clone()));
        plan.extend(actions);
    }

    let package_source = match platform.install_method {
        InstallMethod::StagedRpm => {
            let staged = staging_actions(&artifact);
            package_requires.extend(staged.last().map(|a| a.id.clone()));
            plan.extend(staged);
            Some(artifact.local_path.clone())
        }
        InstallMethod::Repository => None,
    };

    let mut package = PlannedAction::new(Action::EnsurePackage {
        name: PackageName::new(platform.package_name),
        version: version.clone(),
        provider: platform.provider,
        source: package_source,
    });
    package.requires = package_requires;
    plan.push(package);

    tracing::info!(
        platform_tag = %descriptor.platform_tag,
        install_method = %platform.install_method,
        actions = plan.len(),
        "Resolved install plan"
    );

    Ok(Resolution {
        descriptor,
        platform,
        artifact,
        trust,
        repository,
        plan,
    })
}

/// Resolve just the plan.
///
/// # Errors
///
/// See [`resolve_detailed`].
pub fn resolve(
    facts: &HostFacts,
    coords: &BuildCoordinates,
    params: &Parameters,
) -> Result<ActionPlan, PlanError> {
    resolve_detailed(facts, coords, params).map(|r| r.plan)
}

/// Validate the platform only, without planning.
///
/// # Errors
///
/// Returns [`PlanError::UnsupportedPlatform`] when the host is outside the
/// support matrix.
pub fn check_platform(facts: &HostFacts) -> Result<(PlatformDescriptor, SupportedPlatform), PlanError> {
    let descriptor = PlatformDescriptor::from_facts(facts);
    let platform = matrix::lookup(&descriptor, facts.managed)?;
    Ok((descriptor, platform))
}

/// Staging directories and the artifact file, in dependency order.
fn staging_actions(artifact: &ArtifactSpec) -> Vec<PlannedAction> {
    let root = PlannedAction::new(Action::EnsureDirectory {
        path: paths::INSTALL_ROOT.to_string(),
        mode: None,
    });
    let staging = PlannedAction::new(Action::EnsureDirectory {
        path: paths::STAGING_DIR.to_string(),
        mode: None,
    })
    .requires(root.id.clone());
    let file = PlannedAction::new(Action::EnsureFile {
        path: artifact.local_path.clone(),
        source: artifact.source_url.clone(),
        mode: None,
        owner: None,
        group: None,
    })
    .requires(staging.id.clone());

    vec![root, staging, file]
}
