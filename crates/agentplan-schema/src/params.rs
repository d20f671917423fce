//! User-supplied deployment parameters.

use crate::types::Version;
use serde::{Deserialize, Deserializer, Serialize};

/// Deployment parameters for one resolution.
///
/// `package_version` is required but modelled as an `Option` so that its
/// absence can be reported by name instead of as a generic parse failure.
/// Both toggles default to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Exact agent version to install.
    #[serde(default)]
    pub package_version: Option<Version>,
    /// Whether to declare the package repository definition.
    #[serde(default = "enabled", deserialize_with = "flexible_bool")]
    pub manage_repo: bool,
    /// Whether to declare the trust directories the GPG keys live in.
    #[serde(default = "enabled", deserialize_with = "flexible_bool")]
    pub manage_pki_dir: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            package_version: None,
            manage_repo: true,
            manage_pki_dir: true,
        }
    }
}

impl Parameters {
    /// Parameters for `version` with both toggles at their defaults.
    pub fn for_version(version: impl Into<Version>) -> Self {
        Self {
            package_version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Set `manage_repo`.
    pub fn with_manage_repo(mut self, manage_repo: bool) -> Self {
        self.manage_repo = manage_repo;
        self
    }

    /// Set `manage_pki_dir`.
    pub fn with_manage_pki_dir(mut self, manage_pki_dir: bool) -> Self {
        self.manage_pki_dir = manage_pki_dir;
        self
    }
}

/// Accept `true`/`false` as booleans or as the strings `"true"`/`"false"`.
///
/// Operators commonly quote toggles in their parameter files.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => parse_bool(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("expected true or false, got '{s}'"))
        }),
    }
}

/// Parse the textual booleans host inventories and parameter files use.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
