//! Fixed locations on the target host.
//!
//! These are paths on the machine being converged, not on the machine running
//! the resolution, so they are plain strings rather than `PathBuf`s.

/// Agent installation root: /opt/puppetlabs
pub const INSTALL_ROOT: &str = "/opt/puppetlabs";

/// Staging directory for downloaded packages: /opt/puppetlabs/packages
pub const STAGING_DIR: &str = "/opt/puppetlabs/packages";

/// Trust directory parent: /etc/pki
pub const PKI_DIR: &str = "/etc/pki";

/// Directory holding rpm GPG keys: /etc/pki/rpm-gpg
pub const GPG_KEY_DIR: &str = "/etc/pki/rpm-gpg";

/// Directory holding zypper repository definitions.
pub const ZYPP_REPOS_DIR: &str = "/etc/zypp/repos.d";

/// Search path for import commands and their guards.
pub const EXEC_SEARCH_PATH: &str = "/bin:/usr/bin:/sbin:/usr/sbin";

/// Path a package file is staged at: /opt/puppetlabs/packages/<filename>
pub fn staged_package_path(filename: &str) -> String {
    format!("{STAGING_DIR}/{filename}")
}

/// Path a GPG key is installed at: /etc/pki/rpm-gpg/RPM-<key name>
pub fn gpg_key_path(key_name: &str) -> String {
    format!("{GPG_KEY_DIR}/RPM-{key_name}")
}

/// Repository definition file for `repo_id`: /etc/zypp/repos.d/<id>.repo
pub fn repo_definition_path(repo_id: &str) -> String {
    format!("{ZYPP_REPOS_DIR}/{repo_id}.repo")
}
