//! The zypper repository served by the compiling server.

use crate::paths;
use crate::platform::PlatformDescriptor;
use agentplan_schema::{Action, BuildCoordinates, PlannedAction};
use serde::Serialize;

/// Repository id, also used as the section name and file stem.
pub const REPO_ID: &str = "pc_repo";

/// Port the compiling server serves packages on.
pub const PACKAGE_PORT: u16 = 8140;

/// One `key=value` line of the repository definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySetting {
    /// Setting name.
    pub key: &'static str,
    /// Setting value.
    pub value: String,
}

/// The repository definition, or its deliberate absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryPlan {
    /// False when repository management is switched off.
    pub enabled: bool,
    /// Definition file.
    pub file: String,
    /// Section inside the file.
    pub section: &'static str,
    /// Settings in write order. Empty when disabled.
    pub settings: Vec<RepositorySetting>,
}

impl RepositoryPlan {
    /// Plan the repository definition for this platform.
    ///
    /// When `manage_repo` is false the plan carries no settings at all, so
    /// nothing about the repository reaches the executor.
    pub fn new(manage_repo: bool, desc: &PlatformDescriptor, coords: &BuildCoordinates) -> Self {
        let settings = if manage_repo {
            vec![
                setting("name", REPO_ID),
                setting("enabled", "1"),
                setting("autorefresh", "0"),
                setting("baseurl", &base_url(desc, coords)),
                setting("type", "rpm-md"),
            ]
        } else {
            tracing::debug!("manage_repo disabled; repository definition left unmanaged");
            Vec::new()
        };

        Self {
            enabled: manage_repo,
            file: paths::repo_definition_path(REPO_ID),
            section: REPO_ID,
            settings,
        }
    }

    /// Value of a setting, if planned.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.value.as_str())
    }

    /// One action per setting. The settings are independent of each other.
    pub fn actions(&self) -> Vec<PlannedAction> {
        self.settings
            .iter()
            .map(|s| {
                PlannedAction::new(Action::SetRepositorySetting {
                    file: self.file.clone(),
                    section: self.section.to_string(),
                    key: s.key.to_string(),
                    value: s.value.clone(),
                })
            })
            .collect()
    }
}

fn setting(key: &'static str, value: &str) -> RepositorySetting {
    RepositorySetting {
        key,
        value: value.to_string(),
    }
}

/// `https://<server>:8140/packages/<build>/<tag>?ssl_verify=no`
pub fn base_url(desc: &PlatformDescriptor, coords: &BuildCoordinates) -> String {
    format!(
        "https://{server}:{PACKAGE_PORT}/packages/{build}/{tag}?ssl_verify=no",
        server = coords.compiling_server,
        build = coords.build_id,
        tag = desc.platform_tag,
    )
}
