//! Resolution requests loaded from TOML.
//!
//! A request file carries the three inputs of a resolution:
//!
//! ```toml
//! [facts]
//! osfamily = "Suse"
//! operatingsystem = "SLES"
//! operatingsystemmajrelease = "12"
//! architecture = "x64"
//! is_pe = true
//!
//! [build]
//! servername = "master.example.vm"
//! pe_build = "2000.0.0"
//! clientcert = "foo.example.vm"
//!
//! [params]
//! package_version = "1.10.100"
//! manage_repo = true
//! manage_pki_dir = "false"
//! ```
//!
//! Command-line flags are layered on top by [`Overrides`].

use agentplan_core::FactSnapshot;
use agentplan_schema::{BuildCoordinates, Parameters, Version};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid --fact '{0}': expected name=value")]
    FactOverride(String),
}

/// A fact value as written in TOML. Inventories are flat strings, so
/// everything is stringified on the way in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FactValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl std::fmt::Display for FactValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct BuildSection {
    servername: Option<String>,
    pe_build: Option<String>,
    clientcert: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RequestFile {
    #[serde(default)]
    facts: BTreeMap<String, FactValue>,
    #[serde(default)]
    build: BuildSection,
    #[serde(default)]
    params: Parameters,
}

/// The three inputs of a resolution, ready to hand to the core.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub facts: FactSnapshot,
    pub build: BuildCoordinates,
    pub params: Parameters,
}

/// Values given on the command line, applied over the request file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub package_version: Option<String>,
    pub no_manage_repo: bool,
    pub no_manage_pki_dir: bool,
    pub server: Option<String>,
    pub build: Option<String>,
    pub client: Option<String>,
    pub facts: Vec<String>,
}

/// Pick the request file: the explicit path, else
/// `<config dir>/agentplan/request.toml` if it exists.
///
/// `--request` and `$AGENTPLAN_REQUEST` both arrive as `explicit`.
pub fn request_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|d| d.join("agentplan").join("request.toml"))
        .filter(|p| p.exists())
}

impl Request {
    /// Parse a request from TOML text. `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: RequestFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            facts: file
                .facts
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
            build: BuildCoordinates::new(
                file.build.servername.unwrap_or_default(),
                file.build.pe_build.unwrap_or_default(),
                file.build.clientcert.unwrap_or_default(),
            ),
            params: file.params,
        })
    }

    /// Read and parse a request file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load from [`request_path`], or start empty when there is no file.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match request_path(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading request");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn apply(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(v) = &overrides.package_version {
            self.params.package_version = Some(Version::new(v));
        }
        if overrides.no_manage_repo {
            self.params.manage_repo = false;
        }
        if overrides.no_manage_pki_dir {
            self.params.manage_pki_dir = false;
        }
        if let Some(server) = &overrides.server {
            self.build.compiling_server.clone_from(server);
        }
        if let Some(build) = &overrides.build {
            self.build.build_id.clone_from(build);
        }
        if let Some(client) = &overrides.client {
            self.build.client.clone_from(client);
        }
        for raw in &overrides.facts {
            let (name, value) = raw
                .split_once('=')
                .filter(|(name, _)| !name.trim().is_empty())
                .ok_or_else(|| ConfigError::FactOverride(raw.clone()))?;
            self.facts.insert(name.trim(), value.trim());
        }
        Ok(self)
    }
}
