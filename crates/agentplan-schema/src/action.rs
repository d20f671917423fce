//! Typed actions handed to the executor.
//!
//! An action describes a desired end state, not a procedure. The executor is
//! expected to converge each one idempotently and in plan order.

use crate::types::{PackageName, Version};
use serde::{Deserialize, Serialize};

/// How the executor reports a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the command output only when it fails.
    OnFailure,
    /// Always log the command output.
    Always,
    /// Never log the command output.
    Never,
}

/// Packaging tool that installs the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Install a local rpm file directly.
    Rpm,
    /// Install from a configured zypper repository.
    Zypper,
}

impl Provider {
    /// Name of the packaging tool.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rpm => "rpm",
            Self::Zypper => "zypper",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One desired-state declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// A directory exists at `path`.
    EnsureDirectory {
        /// Absolute path on the target host.
        path: String,
        /// Octal mode, left to the executor's default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<String>,
    },
    /// A file exists at `path` with content fetched from `source`.
    EnsureFile {
        /// Absolute path on the target host.
        path: String,
        /// Where the executor fetches the content from.
        source: String,
        /// Octal mode.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<String>,
        /// Owning user.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner: Option<String>,
        /// Owning group.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<String>,
    },
    /// Run `command` unless `guard` exits successfully.
    RunCommandUnless {
        /// Stable name for the command, used as its identity in the plan.
        name: String,
        /// Command that performs the change. Not idempotent on its own.
        command: String,
        /// Shell check that succeeds when the change is already applied.
        guard: String,
        /// `PATH` the executor runs both commands with.
        search_path: String,
        /// When the executor should surface command output.
        on_failure: FailurePolicy,
    },
    /// One key in a section of an ini-style repository definition.
    SetRepositorySetting {
        /// Repository definition file.
        file: String,
        /// Section inside the file.
        section: String,
        /// Setting name.
        key: String,
        /// Setting value.
        value: String,
    },
    /// A package is installed at exactly `version`.
    EnsurePackage {
        /// Package name.
        name: PackageName,
        /// Exact version.
        version: Version,
        /// Packaging tool.
        provider: Provider,
        /// Local artifact to install from, for providers that need one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
}

impl Action {
    /// Identity of this action inside a plan.
    ///
    /// Two actions with the same id declare the same resource.
    pub fn id(&self) -> ActionId {
        match self {
            Self::EnsureDirectory { path, .. } => ActionId::new("directory", path),
            Self::EnsureFile { path, .. } => ActionId::new("file", path),
            Self::RunCommandUnless { name, .. } => ActionId::new("exec", name),
            Self::SetRepositorySetting {
                file, section, key, ..
            } => ActionId::new("repo_setting", &format!("{file}#{section}.{key}")),
            Self::EnsurePackage { name, .. } => ActionId::new("package", name.as_str()),
        }
    }

    /// Short kind label, e.g. `directory`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EnsureDirectory { .. } => "directory",
            Self::EnsureFile { .. } => "file",
            Self::RunCommandUnless { .. } => "exec",
            Self::SetRepositorySetting { .. } => "repo_setting",
            Self::EnsurePackage { .. } => "package",
        }
    }
}

/// Identity of an action, rendered as `kind[title]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    /// Build an id from a kind label and a title.
    pub fn new(kind: &str, title: &str) -> Self {
        Self(format!("{kind}[{title}]"))
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An action together with the actions it must run after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAction {
    /// Identity, derived from the action.
    pub id: ActionId,
    /// The declaration itself.
    #[serde(flatten)]
    pub action: Action,
    /// Actions that must be converged first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<ActionId>,
}

impl PlannedAction {
    /// Wrap an action with no dependencies.
    pub fn new(action: Action) -> Self {
        Self {
            id: action.id(),
            action,
            requires: Vec::new(),
        }
    }

    /// Add a dependency.
    pub fn requires(mut self, id: ActionId) -> Self {
        self.requires.push(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_by_kind() {
        let dir = Action::EnsureDirectory {
            path: "/etc/pki".into(),
            mode: None,
        };
        assert_eq!(dir.id().as_str(), "directory[/etc/pki]");

        let setting = Action::SetRepositorySetting {
            file: "/etc/zypp/repos.d/pc_repo.repo".into(),
            section: "pc_repo".into(),
            key: "baseurl".into(),
            value: "https://example".into(),
        };
        assert_eq!(
            setting.id().as_str(),
            "repo_setting[/etc/zypp/repos.d/pc_repo.repo#pc_repo.baseurl]"
        );
    }

    #[test]
    fn test_planned_action_serializes_flat() {
        let file = PlannedAction::new(Action::EnsureFile {
            path: "/etc/pki/rpm-gpg/RPM-GPG-KEY-puppet".into(),
            source: "puppet:///modules/puppet_agent/GPG-KEY-puppet".into(),
            mode: Some("0644".into()),
            owner: Some("0".into()),
            group: Some("0".into()),
        })
        .requires(ActionId::new("directory", "/etc/pki/rpm-gpg"));

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "ensure_file");
        assert_eq!(json["id"], "file[/etc/pki/rpm-gpg/RPM-GPG-KEY-puppet]");
        assert_eq!(json["requires"][0], "directory[/etc/pki/rpm-gpg]");

        let back: PlannedAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, file);
    }
}
