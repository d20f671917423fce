//! Package artifact naming.

use crate::matrix::SupportedPlatform;
use crate::paths;
use crate::platform::PlatformDescriptor;
use agentplan_schema::{BuildCoordinates, Version};
use serde::Serialize;

/// Mount point on the compiling server that serves agent packages.
const PACKAGE_MOUNT: &str = "puppet:///pe_packages";

/// The agent package for one platform and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSpec {
    /// rpm filename, e.g. `puppet-agent-1.10.100-1.sles10.x86_64.rpm`.
    pub filename: String,
    /// Where the file is staged on the host.
    pub local_path: String,
    /// Where the executor fetches it from.
    pub source_url: String,
}

impl ArtifactSpec {
    /// Derive filename, staging path and source URL.
    ///
    /// A pure function of its inputs. `version` has already been validated
    /// by [`crate::params::package_version`].
    pub fn resolve(
        platform: &SupportedPlatform,
        desc: &PlatformDescriptor,
        version: &Version,
        coords: &BuildCoordinates,
    ) -> Self {
        let filename = format!(
            "{name}-{version}-{release}.{distro}{major}.{arch}.rpm",
            name = platform.package_name,
            release = platform.release_suffix,
            distro = desc.distro_short(),
            major = desc.major_release,
            arch = desc.arch,
        );
        let source_url = format!(
            "{PACKAGE_MOUNT}/{build}/{tag}/{filename}",
            build = coords.build_id,
            tag = desc.platform_tag,
        );
        let local_path = paths::staged_package_path(&filename);

        Self {
            filename,
            local_path,
            source_url,
        }
    }
}
