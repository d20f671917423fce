//! GPG key files and their import commands.

use crate::paths;
use agentplan_schema::{Action, ActionId, FailurePolicy, PlannedAction};
use serde::Serialize;

/// Keys shipped with every repository install, by name.
pub const TRUST_KEYS: [&str; 2] = ["GPG-KEY-puppet", "GPG-KEY-puppetlabs"];

/// Where key content is served from.
const KEY_SOURCE_MOUNT: &str = "puppet:///modules/puppet_agent";

const KEY_OWNER: &str = "0";
const KEY_GROUP: &str = "0";
const KEY_MODE: &str = "0644";

/// A key file to lay down on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustKey {
    /// Key name, e.g. `GPG-KEY-puppet`.
    pub name: String,
    /// Where the key content comes from.
    pub source: String,
    /// Where it is written.
    pub target_path: String,
    /// File mode.
    pub mode: &'static str,
    /// Owning user id.
    pub owner: &'static str,
    /// Owning group id.
    pub group: &'static str,
}

/// Import of one key into the rpm database, guarded so it runs at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyImport {
    /// Key being imported.
    pub key_name: String,
    /// Key file the import reads.
    pub key_path: String,
    /// `rpm --import`. Not idempotent on its own.
    pub import_command: String,
    /// Succeeds when the key's `gpg-pubkey` package is already installed.
    pub idempotency_check_command: String,
}

impl KeyImport {
    /// Name the import is declared under, e.g. `import-GPG-KEY-puppet`.
    pub fn exec_name(&self) -> String {
        format!("import-{}", self.key_name)
    }
}

/// Everything needed to make the signing keys trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustPlan {
    /// Whether `/etc/pki` and `/etc/pki/rpm-gpg` are declared.
    pub manage_dirs: bool,
    /// Key files.
    pub keys: Vec<TrustKey>,
    /// Guarded imports, one per key.
    pub imports: Vec<KeyImport>,
}

impl TrustPlan {
    /// Plan the compiled-in keys.
    ///
    /// Key files and imports are always planned. With `manage_pki_dir` off,
    /// the directories are expected to exist already and are not declared.
    pub fn new(manage_pki_dir: bool) -> Self {
        let keys: Vec<TrustKey> = TRUST_KEYS
            .iter()
            .map(|name| TrustKey {
                name: (*name).to_string(),
                source: format!("{KEY_SOURCE_MOUNT}/{name}"),
                target_path: paths::gpg_key_path(name),
                mode: KEY_MODE,
                owner: KEY_OWNER,
                group: KEY_GROUP,
            })
            .collect();

        let imports = keys
            .iter()
            .map(|key| KeyImport {
                key_name: key.name.clone(),
                key_path: key.target_path.clone(),
                import_command: format!("rpm --import {}", key.target_path),
                idempotency_check_command: installed_key_check(&key.target_path),
            })
            .collect();

        if !manage_pki_dir {
            tracing::debug!("manage_pki_dir disabled; trust directories left unmanaged");
        }

        Self {
            manage_dirs: manage_pki_dir,
            keys,
            imports,
        }
    }

    /// Actions in dependency order: directories, key files, imports.
    pub fn actions(&self) -> Vec<PlannedAction> {
        let mut out = Vec::new();

        let parent = PlannedAction::new(Action::EnsureDirectory {
            path: paths::PKI_DIR.to_string(),
            mode: None,
        });
        let key_dir = PlannedAction::new(Action::EnsureDirectory {
            path: paths::GPG_KEY_DIR.to_string(),
            mode: None,
        })
        .requires(parent.id.clone());
        let key_dir_id = key_dir.id.clone();

        if self.manage_dirs {
            out.push(parent);
            out.push(key_dir);
        }

        for key in &self.keys {
            let mut file = PlannedAction::new(Action::EnsureFile {
                path: key.target_path.clone(),
                source: key.source.clone(),
                mode: Some(key.mode.to_string()),
                owner: Some(key.owner.to_string()),
                group: Some(key.group.to_string()),
            });
            if self.manage_dirs {
                file = file.requires(key_dir_id.clone());
            }
            out.push(file);
        }

        for import in &self.imports {
            let file_id = ActionId::new("file", &import.key_path);
            out.push(
                PlannedAction::new(Action::RunCommandUnless {
                    name: import.exec_name(),
                    command: import.import_command.clone(),
                    guard: import.idempotency_check_command.clone(),
                    search_path: paths::EXEC_SEARCH_PATH.to_string(),
                    on_failure: FailurePolicy::OnFailure,
                })
                .requires(file_id),
            );
        }

        out
    }
}

/// Shell check that succeeds when the key in `key_path` is already imported.
///
/// rpm records an imported key as the package `gpg-pubkey-<id>`, where `<id>`
/// is the lowercased short key id: characters 11-18 of the long key id gpg
/// prints with `--throw-keyids`.
fn installed_key_check(key_path: &str) -> String {
    format!(
        "rpm -q gpg-pubkey-$(echo $(gpg --homedir /root/.gnupg --throw-keyids < {key_path}) | cut --characters=11-18 | tr [:upper:] [:lower:])"
    )
}
