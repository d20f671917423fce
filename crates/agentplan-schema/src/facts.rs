//! Inputs supplied by the host inventory and the build coordinator.

use serde::{Deserialize, Serialize};

/// Operating system family as reported by the host inventory (`osfamily`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OsFamily {
    /// SUSE Linux Enterprise and openSUSE.
    Suse,
    /// Red Hat Enterprise Linux and rebuilds.
    RedHat,
    /// Debian and Ubuntu.
    Debian,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    Darwin,
    /// Any other family, kept verbatim for error reporting.
    Other(String),
}

impl OsFamily {
    /// Name as the inventory spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Suse => "Suse",
            Self::RedHat => "RedHat",
            Self::Debian => "Debian",
            Self::Windows => "windows",
            Self::Darwin => "Darwin",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for OsFamily {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "suse" => Self::Suse,
            "redhat" => Self::RedHat,
            "debian" => Self::Debian,
            "windows" => Self::Windows,
            "darwin" => Self::Darwin,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for OsFamily {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<OsFamily> for String {
    fn from(family: OsFamily) -> Self {
        family.as_str().to_string()
    }
}

/// Immutable snapshot of the facts one resolution needs about a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFacts {
    /// OS family (`osfamily`).
    pub family: OsFamily,
    /// Distribution name exactly as reported, e.g. `SLES` (`operatingsystem`).
    pub distro: String,
    /// Major release, e.g. `12` (`operatingsystemmajrelease`).
    pub major_release: String,
    /// Architecture as reported, before normalization (`architecture`).
    pub architecture: String,
    /// Whether the host runs under the enterprise-managed deployment model (`is_pe`).
    pub managed: bool,
}

/// Where the agent packages are built and served from.
///
/// Injected explicitly by the caller; nothing in the resolution path looks
/// these values up on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCoordinates {
    /// Hostname of the compiling server that serves the package repository.
    #[serde(rename = "servername")]
    pub compiling_server: String,
    /// Opaque build identifier embedded in download and repository URLs.
    #[serde(rename = "pe_build")]
    pub build_id: String,
    /// Identity of the client the plan is computed for.
    #[serde(rename = "clientcert", default)]
    pub client: String,
}

impl BuildCoordinates {
    /// Create coordinates from their three parts.
    pub fn new(
        compiling_server: impl Into<String>,
        build_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            compiling_server: compiling_server.into(),
            build_id: build_id.into(),
            client: client.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parsing_is_case_insensitive() {
        assert_eq!(OsFamily::from("Suse"), OsFamily::Suse);
        assert_eq!(OsFamily::from("SUSE"), OsFamily::Suse);
        assert_eq!(OsFamily::from("RedHat"), OsFamily::RedHat);
    }

    #[test]
    fn test_unknown_family_kept_verbatim() {
        let family = OsFamily::from("Gentoo");
        assert_eq!(family, OsFamily::Other("Gentoo".to_string()));
        assert_eq!(family.to_string(), "Gentoo");
    }

    #[test]
    fn test_coordinates_use_inventory_names() {
        let coords: BuildCoordinates = toml::from_str(
            r#"
            servername = "master.example.vm"
            pe_build = "2000.0.0"
            clientcert = "foo.example.vm"
            "#,
        )
        .unwrap();
        assert_eq!(
            coords,
            BuildCoordinates::new("master.example.vm", "2000.0.0", "foo.example.vm")
        );
    }
}
