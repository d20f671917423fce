//! Canonical platform identity derived from raw host facts.

use agentplan_schema::{Arch, HostFacts, OsFamily};
use serde::Serialize;

/// Release line whose packages only exist for `x86_64`.
const LEGACY_X86_64_RELEASE: &str = "10";

/// Canonical form of [`HostFacts`], used as the support-matrix key and in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformDescriptor {
    /// OS family.
    pub family: OsFamily,
    /// Distro name as reported; casing is preserved for error messages.
    pub distro: String,
    /// Major release.
    pub major_release: String,
    /// Normalized architecture.
    pub arch: Arch,
    /// `<distro-lowercase>-<major_release>-<arch>`, e.g. `sles-12-x86_64`.
    pub platform_tag: String,
}

impl PlatformDescriptor {
    /// Normalize raw facts. Infallible: validation is the support matrix's job.
    pub fn from_facts(facts: &HostFacts) -> Self {
        let distro = facts.distro.trim().to_string();
        let major_release = facts.major_release.trim().to_string();

        let arch = if requires_legacy_arch(&facts.family, &major_release) {
            Arch::X86_64
        } else {
            Arch::from(facts.architecture.as_str())
        };

        let platform_tag = platform_tag(&distro, &major_release, &arch);

        tracing::debug!(
            family = %facts.family,
            reported_arch = %facts.architecture,
            %platform_tag,
            "Derived platform descriptor"
        );

        Self {
            family: facts.family.clone(),
            distro,
            major_release,
            arch,
            platform_tag,
        }
    }

    /// Short distro code used in rpm release strings, e.g. `sles`.
    pub fn distro_short(&self) -> String {
        self.distro.to_lowercase()
    }
}

/// The SLES 10 packages were only ever built for `x86_64`, so the reported
/// architecture is ignored there. Keyed on the exact release, nothing broader.
pub fn requires_legacy_arch(family: &OsFamily, major_release: &str) -> bool {
    *family == OsFamily::Suse && major_release == LEGACY_X86_64_RELEASE
}

/// Compose a platform tag.
pub fn platform_tag(distro: &str, major_release: &str, arch: &Arch) -> String {
    format!("{}-{major_release}-{arch}", distro.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(release: &str, arch: &str) -> HostFacts {
        HostFacts {
            family: OsFamily::Suse,
            distro: "SLES".to_string(),
            major_release: release.to_string(),
            architecture: arch.to_string(),
            managed: true,
        }
    }

    #[test]
    fn test_tag_is_lowercase_and_normalized() {
        let desc = PlatformDescriptor::from_facts(&facts("12", "x64"));
        assert_eq!(desc.arch, Arch::X86_64);
        assert_eq!(desc.platform_tag, "sles-12-x86_64");
        assert_eq!(desc.distro, "SLES");
        assert_eq!(desc.distro_short(), "sles");
    }

    #[test]
    fn test_release_10_forces_x86_64() {
        for reported in ["i386", "s390x", "x64", "whatever"] {
            let desc = PlatformDescriptor::from_facts(&facts("10", reported));
            assert_eq!(desc.arch, Arch::X86_64, "{reported}");
            assert_eq!(desc.platform_tag, "sles-10-x86_64");
        }
    }

    #[test]
    fn test_other_releases_keep_reported_arch() {
        let desc = PlatformDescriptor::from_facts(&facts("11", "i686"));
        assert_eq!(desc.arch, Arch::I386);
        assert_eq!(desc.platform_tag, "sles-11-i386");
    }

    #[test]
    fn test_legacy_rule_is_suse_only() {
        let mut f = facts("10", "i386");
        f.family = OsFamily::RedHat;
        assert_eq!(PlatformDescriptor::from_facts(&f).arch, Arch::I386);
    }
}
