//! Inbound collaborators: where facts and build coordinates come from.

use crate::error::PlanError;
use agentplan_schema::params::parse_bool;
use agentplan_schema::{BuildCoordinates, HostFacts, OsFamily};
use std::collections::BTreeMap;

/// Fact names in a flat inventory snapshot.
pub mod fact {
    /// OS family, e.g. `Suse`.
    pub const OS_FAMILY: &str = "osfamily";
    /// Distribution, e.g. `SLES`.
    pub const OPERATING_SYSTEM: &str = "operatingsystem";
    /// Major release, e.g. `12`.
    pub const MAJOR_RELEASE: &str = "operatingsystemmajrelease";
    /// Reported architecture, e.g. `x64`.
    pub const ARCHITECTURE: &str = "architecture";
    /// Managed-mode flag.
    pub const IS_PE: &str = "is_pe";
}

/// Supplies the host facts for one resolution.
pub trait HostInventory {
    /// Snapshot the facts.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MissingFact`] or [`PlanError::InvalidFact`] when
    /// the inventory cannot produce a complete snapshot.
    fn host_facts(&self) -> Result<HostFacts, PlanError>;
}

/// Supplies the compiling server and build identifier.
pub trait BuildCoordinator {
    /// Current coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MissingParameter`] when the coordinator has no
    /// build to offer.
    fn build_coordinates(&self) -> Result<BuildCoordinates, PlanError>;
}

impl HostInventory for HostFacts {
    fn host_facts(&self) -> Result<HostFacts, PlanError> {
        Ok(self.clone())
    }
}

impl BuildCoordinator for BuildCoordinates {
    fn build_coordinates(&self) -> Result<BuildCoordinates, PlanError> {
        crate::params::build_coordinates(self)?;
        Ok(self.clone())
    }
}

/// A flat key/value fact snapshot, as host inventories report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSnapshot(BTreeMap<String, String>);

impl FactSnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fact, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Value of a fact.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&str, PlanError> {
        self.get(name)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PlanError::MissingFact {
                name: name.to_string(),
            })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FactSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl HostInventory for FactSnapshot {
    /// An absent `is_pe` reads as unmanaged, which the support matrix then
    /// rejects by distro name.
    fn host_facts(&self) -> Result<HostFacts, PlanError> {
        let managed = match self.get(fact::IS_PE) {
            None => false,
            Some(raw) => parse_bool(raw).ok_or_else(|| PlanError::InvalidFact {
                name: fact::IS_PE.to_string(),
                value: raw.to_string(),
            })?,
        };

        Ok(HostFacts {
            family: OsFamily::from(self.require(fact::OS_FAMILY)?),
            distro: self.require(fact::OPERATING_SYSTEM)?.to_string(),
            major_release: self.require(fact::MAJOR_RELEASE)?.to_string(),
            architecture: self.require(fact::ARCHITECTURE)?.to_string(),
            managed,
        })
    }
}
