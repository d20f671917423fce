//! End-to-end resolution for the SUSE family.

use agentplan_core::{
    FactSnapshot, PlanError, RecordingExecutor, apply, resolve, resolve_detailed, resolve_with,
};
use agentplan_schema::{
    Action, ActionId, ActionPlan, BuildCoordinates, HostFacts, OsFamily, Parameters, Provider,
};

const PACKAGE_VERSION: &str = "1.10.100";

fn facts(release: &str) -> HostFacts {
    HostFacts {
        family: OsFamily::Suse,
        distro: "SLES".to_string(),
        major_release: release.to_string(),
        architecture: "x64".to_string(),
        managed: true,
    }
}

fn coords() -> BuildCoordinates {
    BuildCoordinates::new("master.example.vm", "2000.0.0", "foo.example.vm")
}

fn params() -> Parameters {
    Parameters::for_version(PACKAGE_VERSION)
}

fn plan_for(release: &str, params: &Parameters) -> ActionPlan {
    resolve(&facts(release), &coords(), params).expect("plan should resolve")
}

fn repo_setting_id(key: &str) -> ActionId {
    ActionId::new(
        "repo_setting",
        &format!("/etc/zypp/repos.d/pc_repo.repo#pc_repo.{key}"),
    )
}

const REPO_KEYS: [&str; 5] = ["name", "enabled", "autorefresh", "baseurl", "type"];

// ---------------------------------------------------------------------------
// Unsupported environments
// ---------------------------------------------------------------------------

#[test]
fn test_unmanaged_sles_is_rejected_by_distro() {
    let mut f = facts("12");
    f.managed = false;
    let err = resolve(&f, &coords(), &params()).unwrap_err();
    assert!(matches!(err, PlanError::UnsupportedPlatform { .. }));
    assert!(err.to_string().contains("SLES not supported"));
}

#[test]
fn test_unmanaged_opensuse_is_rejected_by_distro() {
    let mut f = facts("12");
    f.managed = false;
    f.distro = "OpenSuse".to_string();
    let err = resolve(&f, &coords(), &params()).unwrap_err();
    assert!(err.to_string().contains("OpenSuse not supported"));
}

#[test]
fn test_managed_opensuse_is_rejected_by_distro() {
    let mut f = facts("12");
    f.distro = "OpenSuse".to_string();
    let err = resolve(&f, &coords(), &params()).unwrap_err();
    assert_eq!(
        err,
        PlanError::UnsupportedPlatform {
            detail: "OpenSuse".to_string()
        }
    );
}

// ---------------------------------------------------------------------------
// SLES 10: staged rpm
// ---------------------------------------------------------------------------

#[test]
fn test_sles10_stages_and_installs_the_rpm() {
    let mut f = facts("10");
    f.architecture = "x86_64".to_string();
    let resolution = resolve_detailed(&f, &coords(), &params()).unwrap();

    assert_eq!(resolution.descriptor.platform_tag, "sles-10-x86_64");
    assert_eq!(
        resolution.artifact.filename,
        "puppet-agent-1.10.100-1.sles10.x86_64.rpm"
    );

    let plan = &resolution.plan;
    assert!(plan.contains(&ActionId::new("directory", "/opt/puppetlabs")));
    assert!(plan.contains(&ActionId::new("directory", "/opt/puppetlabs/packages")));

    let staged = ActionId::new(
        "file",
        "/opt/puppetlabs/packages/puppet-agent-1.10.100-1.sles10.x86_64.rpm",
    );
    match &plan.get(&staged).expect("staged rpm").action {
        Action::EnsureFile { source, .. } => assert_eq!(
            source,
            "puppet:///pe_packages/2000.0.0/sles-10-x86_64/puppet-agent-1.10.100-1.sles10.x86_64.rpm"
        ),
        other => panic!("unexpected action {other:?}"),
    }

    match &plan.get(&ActionId::new("package", "puppet-agent")).unwrap().action {
        Action::EnsurePackage {
            version,
            provider,
            source,
            ..
        } => {
            assert_eq!(version, &PACKAGE_VERSION);
            assert_eq!(*provider, Provider::Rpm);
            assert_eq!(
                source.as_deref(),
                Some("/opt/puppetlabs/packages/puppet-agent-1.10.100-1.sles10.x86_64.rpm")
            );
        }
        other => panic!("unexpected action {other:?}"),
    }

    assert!(resolution.trust.is_none());
    assert!(resolution.repository.is_none());
}

#[test]
fn test_sles10_ignores_reported_arch() {
    let mut f = facts("10");
    f.architecture = "i386".to_string();
    let resolution = resolve_detailed(&f, &coords(), &params()).unwrap();
    assert_eq!(resolution.descriptor.arch.as_str(), "x86_64");
    assert!(resolution.artifact.filename.ends_with(".sles10.x86_64.rpm"));
}

// ---------------------------------------------------------------------------
// SLES 11 and 12: repository installs
// ---------------------------------------------------------------------------

#[test]
fn test_sles11_and_12_import_keys_with_guards() {
    for release in ["11", "12"] {
        let plan = plan_for(release, &params());
        for key in ["GPG-KEY-puppet", "GPG-KEY-puppetlabs"] {
            let path = format!("/etc/pki/rpm-gpg/RPM-{key}");
            let exec = plan
                .get(&ActionId::new("exec", &format!("import-{key}")))
                .unwrap_or_else(|| panic!("import-{key} on SLES {release}"));

            assert_eq!(exec.requires, [ActionId::new("file", &path)]);
            assert_eq!(
                exec.action,
                Action::RunCommandUnless {
                    name: format!("import-{key}"),
                    command: format!("rpm --import {path}"),
                    guard: format!(
                        "rpm -q gpg-pubkey-$(echo $(gpg --homedir /root/.gnupg --throw-keyids < {path}) | cut --characters=11-18 | tr [:upper:] [:lower:])"
                    ),
                    search_path: "/bin:/usr/bin:/sbin:/usr/sbin".to_string(),
                    on_failure: agentplan_schema::FailurePolicy::OnFailure,
                }
            );

            assert_eq!(
                plan.get(&ActionId::new("file", &path)).unwrap().action,
                Action::EnsureFile {
                    path: path.clone(),
                    source: format!("puppet:///modules/puppet_agent/{key}"),
                    mode: Some("0644".to_string()),
                    owner: Some("0".to_string()),
                    group: Some("0".to_string()),
                }
            );
        }
    }
}

#[test]
fn test_pki_dirs_follow_manage_pki_dir() {
    for release in ["11", "12"] {
        let managed = plan_for(release, &params());
        let unmanaged = plan_for(release, &params().with_manage_pki_dir(false));

        for dir in ["/etc/pki", "/etc/pki/rpm-gpg"] {
            let id = ActionId::new("directory", dir);
            assert!(managed.contains(&id), "{dir} on SLES {release}");
            assert!(!unmanaged.contains(&id), "{dir} on SLES {release}");
        }

        // Keys and imports are still planned against the fixed paths.
        assert!(unmanaged.contains(&ActionId::new("file", "/etc/pki/rpm-gpg/RPM-GPG-KEY-puppet")));
        assert!(unmanaged.contains(&ActionId::new("exec", "import-GPG-KEY-puppetlabs")));
        assert_eq!(unmanaged.validate_order(), Ok(()));
    }
}

#[test]
fn test_repository_settings_when_managed() {
    for release in ["11", "12"] {
        let plan = plan_for(release, &params().with_manage_repo(true));
        let expected = [
            ("name", "pc_repo".to_string()),
            ("enabled", "1".to_string()),
            ("autorefresh", "0".to_string()),
            (
                "baseurl",
                format!(
                    "https://master.example.vm:8140/packages/2000.0.0/sles-{release}-x86_64?ssl_verify=no"
                ),
            ),
            ("type", "rpm-md".to_string()),
        ];
        for (key, value) in expected {
            let action = &plan.get(&repo_setting_id(key)).unwrap().action;
            assert_eq!(
                action,
                &Action::SetRepositorySetting {
                    file: "/etc/zypp/repos.d/pc_repo.repo".to_string(),
                    section: "pc_repo".to_string(),
                    key: key.to_string(),
                    value,
                }
            );
        }
    }
}

#[test]
fn test_repository_settings_absent_when_unmanaged() {
    for release in ["11", "12"] {
        let plan = plan_for(release, &params().with_manage_repo(false));
        for key in REPO_KEYS {
            assert!(!plan.contains(&repo_setting_id(key)), "{key} on SLES {release}");
        }
        assert!(
            plan.iter()
                .all(|a| !matches!(a.action, Action::SetRepositorySetting { .. }))
        );
        assert!(plan.contains(&ActionId::new("package", "puppet-agent")));
    }
}

#[test]
fn test_package_comes_last_via_zypper() {
    let plan = plan_for("12", &params());
    let last = plan.actions().last().unwrap();
    assert_eq!(
        last.action,
        Action::EnsurePackage {
            name: "puppet-agent".into(),
            version: PACKAGE_VERSION.into(),
            provider: Provider::Zypper,
            source: None,
        }
    );
    for dep in &last.requires {
        assert!(plan.position(dep).unwrap() < plan.len() - 1);
    }
}

// ---------------------------------------------------------------------------
// Cross-cutting properties
// ---------------------------------------------------------------------------

#[test]
fn test_missing_package_version_is_named() {
    let err = resolve(&facts("12"), &coords(), &Parameters::default()).unwrap_err();
    assert_eq!(err.to_string(), "Missing required parameter: package_version");
}

#[test]
fn test_blank_build_coordinates_are_named() {
    let blank = BuildCoordinates::new("", "", "");
    for release in ["10", "11", "12"] {
        let err = resolve(&facts(release), &blank, &params()).unwrap_err();
        assert_eq!(err, PlanError::MissingParameter { name: "servername" });
    }
    let no_build = BuildCoordinates::new("master.example.vm", "", "foo.example.vm");
    let err = resolve(&facts("12"), &no_build, &params()).unwrap_err();
    assert_eq!(err.to_string(), "Missing required parameter: pe_build");
}

#[test]
fn test_resolution_is_byte_identical() {
    for release in ["10", "11", "12"] {
        let a = plan_for(release, &params());
        let b = plan_for(release, &params());
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }
}

#[test]
fn test_parallel_resolutions_agree() {
    let expected = plan_for("12", &params()).digest().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| plan_for("12", &params()).digest().unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_flat_snapshot_drives_the_same_plan() {
    let snapshot = FactSnapshot::from_iter([
        ("is_pe", "true"),
        ("osfamily", "Suse"),
        ("operatingsystem", "SLES"),
        ("operatingsystemmajrelease", "12"),
        ("architecture", "x64"),
    ]);
    let via_traits = resolve_with(&snapshot, &coords(), &params()).unwrap();
    assert_eq!(via_traits.plan, plan_for("12", &params()));
}

#[test]
fn test_executor_sees_plan_order() {
    let plan = plan_for("11", &params());
    let recorder = RecordingExecutor::new();
    apply(&plan, &recorder).unwrap();
    assert_eq!(recorder.applied(), plan.actions());
}
