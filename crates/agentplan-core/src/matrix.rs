//! The support matrix: which platforms get a plan, and how.
//!
//! Supported platforms form a closed set of [`PlatformVariant`]s. A static
//! table maps `(family, distro, release)` onto a variant plus the
//! architectures built for it, and each variant maps onto exactly one
//! [`SupportedPlatform`] record. Anything the table does not name is rejected
//! with an error that names the offending value.

use crate::error::PlanError;
use crate::platform::PlatformDescriptor;
use agentplan_schema::{Arch, OsFamily, Provider};
use serde::Serialize;

/// Package name of the agent on every supported platform.
pub const AGENT_PACKAGE: &str = "puppet-agent";

/// Packaging revision appended to the version in rpm filenames.
pub const RPM_RELEASE: &str = "1";

/// Every supported platform line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    /// SUSE Linux Enterprise Server 10.
    Sles10,
    /// SUSE Linux Enterprise Server 11.
    Sles11,
    /// SUSE Linux Enterprise Server 12.
    Sles12,
}

/// Package format understood by the platform's packaging tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageDialect {
    /// RPM packages.
    Rpm,
}

/// How the agent package reaches the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallMethod {
    /// Copy the rpm into the staging directory and install that file.
    StagedRpm,
    /// Install from a package repository served by the compiling server,
    /// after importing the signing keys.
    Repository,
}

impl std::fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::StagedRpm => "staged rpm",
            Self::Repository => "repository",
        })
    }
}

/// What a supported platform needs from the planners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedPlatform {
    /// Which platform line matched.
    pub variant: PlatformVariant,
    /// Package format.
    pub dialect: PackageDialect,
    /// Staged file or repository install.
    pub install_method: InstallMethod,
    /// Tool that installs the package.
    pub provider: Provider,
    /// Whether the reported architecture is ignored in favour of `x86_64`.
    pub requires_legacy_arch_normalization: bool,
    /// Package name.
    pub package_name: &'static str,
    /// Packaging revision used in filenames.
    pub release_suffix: &'static str,
}

impl PlatformVariant {
    /// The record for this platform line.
    pub fn supported_platform(self) -> SupportedPlatform {
        let (install_method, provider, legacy) = match self {
            Self::Sles10 => (InstallMethod::StagedRpm, Provider::Rpm, true),
            Self::Sles11 | Self::Sles12 => (InstallMethod::Repository, Provider::Zypper, false),
        };
        SupportedPlatform {
            variant: self,
            dialect: PackageDialect::Rpm,
            install_method,
            provider,
            requires_legacy_arch_normalization: legacy,
            package_name: AGENT_PACKAGE,
            release_suffix: RPM_RELEASE,
        }
    }
}

#[derive(Debug)]
struct MatrixEntry {
    family: OsFamily,
    distro: &'static str,
    release: &'static str,
    archs: &'static [Arch],
    variant: PlatformVariant,
}

static SUPPORT_MATRIX: &[MatrixEntry] = &[
    MatrixEntry {
        family: OsFamily::Suse,
        distro: "SLES",
        release: "10",
        archs: &[Arch::X86_64],
        variant: PlatformVariant::Sles10,
    },
    MatrixEntry {
        family: OsFamily::Suse,
        distro: "SLES",
        release: "11",
        archs: &[Arch::X86_64, Arch::I386, Arch::S390x],
        variant: PlatformVariant::Sles11,
    },
    MatrixEntry {
        family: OsFamily::Suse,
        distro: "SLES",
        release: "12",
        archs: &[Arch::X86_64, Arch::S390x, Arch::Ppc64le],
        variant: PlatformVariant::Sles12,
    },
];

/// Validate a platform against the matrix.
///
/// Checks run in a fixed order so that the error always names the most
/// specific value an operator needs to look at.
///
/// # Errors
///
/// Returns [`PlanError::UnsupportedPlatform`] naming:
/// - the distro, when `managed` is false;
/// - the family, when no entry exists for it;
/// - the distro, when the family is known but the distro is not;
/// - distro and release, when the release is not built;
/// - the platform tag, when the architecture is not built for that release.
pub fn lookup(desc: &PlatformDescriptor, managed: bool) -> Result<SupportedPlatform, PlanError> {
    if !managed {
        return Err(PlanError::unsupported(&desc.distro));
    }

    let mut family_entries = SUPPORT_MATRIX
        .iter()
        .filter(|e| e.family == desc.family)
        .peekable();
    if family_entries.peek().is_none() {
        return Err(PlanError::unsupported(desc.family.as_str()));
    }

    let mut distro_entries = family_entries
        .filter(|e| e.distro.eq_ignore_ascii_case(&desc.distro))
        .peekable();
    if distro_entries.peek().is_none() {
        return Err(PlanError::unsupported(&desc.distro));
    }

    let entry = distro_entries
        .find(|e| e.release == desc.major_release)
        .ok_or_else(|| PlanError::unsupported(format!("{} {}", desc.distro, desc.major_release)))?;

    if !entry.archs.contains(&desc.arch) {
        return Err(PlanError::unsupported(&desc.platform_tag));
    }

    tracing::debug!(variant = ?entry.variant, platform_tag = %desc.platform_tag, "Platform supported");
    Ok(entry.variant.supported_platform())
}

/// Every supported platform tag, in table order.
pub fn supported_tags() -> Vec<String> {
    SUPPORT_MATRIX
        .iter()
        .flat_map(|e| {
            e.archs
                .iter()
                .map(|arch| crate::platform::platform_tag(e.distro, e.release, arch))
        })
        .collect()
}
