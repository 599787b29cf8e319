// tests/config_test.rs
use ghc::config::{self, defaults, PreBuildConfig, ReleaseConfig, RepoLock};
use ghc::error::GhcError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_config_values() {
    let cfg = ReleaseConfig::default();
    assert!(cfg.repo.is_empty());
    assert_eq!(cfg.branch, defaults::BRANCH);
    assert!(cfg.auto_push);
    assert_eq!(cfg.build_command, defaults::BUILD_COMMAND);
    assert_eq!(cfg.version, defaults::VERSION);
    assert_eq!(cfg.tag_prefix, defaults::TAG_PREFIX);
    assert_eq!(cfg.pre_build, PreBuildConfig::default());
    assert!(!cfg.pre_build.enabled);
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let cfg = ReleaseConfig {
        repo: "git@github.com:acme/widget.git".to_string(),
        branch: "release".to_string(),
        auto_push: false,
        build_command: "make all".to_string(),
        version: "1.4.0".to_string(),
        tag_prefix: "rel-".to_string(),
        pre_build: PreBuildConfig {
            enabled: true,
            commands: vec!["make lint".to_string(), "make test".to_string()],
            script: "./scripts/prepare.sh".to_string(),
            timeout: 120,
            fail_on_error: true,
        },
    };

    config::save_config(dir.path(), &cfg).unwrap();
    let loaded = config::load_config(dir.path()).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn test_missing_config_reports_config_missing() {
    let dir = TempDir::new().unwrap();
    let err = config::load_config(dir.path()).unwrap_err();
    assert!(matches!(err, GhcError::ConfigMissing(_)));
    assert!(err.to_string().contains(defaults::CONFIG_FILE));
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let raw = r#"
repo = "https://github.com/acme/widget"
version = "2.0.0"
"#;
    fs::write(config::config_path(dir.path()), raw).unwrap();

    let cfg = config::load_config(dir.path()).unwrap();
    assert_eq!(cfg.repo, "https://github.com/acme/widget");
    assert_eq!(cfg.version, "2.0.0");
    assert_eq!(cfg.branch, defaults::BRANCH);
    assert_eq!(cfg.build_command, defaults::BUILD_COMMAND);
    assert_eq!(cfg.tag_prefix, defaults::TAG_PREFIX);
    assert!(cfg.auto_push);
    assert!(!cfg.pre_build.enabled);
}

#[test]
fn test_pre_build_section_parses() {
    let dir = TempDir::new().unwrap();
    let raw = r#"
repo = "https://github.com/acme/widget"

[pre_build]
enabled = true
commands = ["cargo fmt --check", "cargo clippy"]
timeout = 60
fail_on_error = true
"#;
    fs::write(config::config_path(dir.path()), raw).unwrap();

    let cfg = config::load_config(dir.path()).unwrap();
    assert!(cfg.pre_build.enabled);
    assert_eq!(cfg.pre_build.commands.len(), 2);
    assert_eq!(cfg.pre_build.timeout, 60);
    assert!(cfg.pre_build.fail_on_error);
    assert!(cfg.pre_build.script.is_empty());
}

#[test]
fn test_malformed_config_reports_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(config::config_path(dir.path()), "repo = [broken").unwrap();

    let err = config::load_config(dir.path()).unwrap_err();
    assert!(matches!(err, GhcError::Config(_)));
}

#[test]
fn test_lock_round_trip() {
    let dir = TempDir::new().unwrap();
    let lock = RepoLock {
        repo: "https://github.com/acme/widget".to_string(),
        branch: "main".to_string(),
        current_version: "0.3.0".to_string(),
        last_updated: "2025-11-02T10:30:00+00:00".to_string(),
    };

    config::save_lock(dir.path(), &lock).unwrap();
    let loaded = config::load_lock(dir.path()).unwrap();
    assert_eq!(loaded, lock);
}

#[test]
fn test_record_version_stamps_rfc3339() {
    let dir = TempDir::new().unwrap();
    config::save_lock(dir.path(), &RepoLock::default()).unwrap();

    let before = chrono::Utc::now();
    config::record_version(dir.path(), "1.2.3").unwrap();

    let lock = config::load_lock(dir.path()).unwrap();
    assert_eq!(lock.current_version, "1.2.3");

    let stamp = chrono::DateTime::parse_from_rfc3339(&lock.last_updated)
        .expect("last_updated must be RFC 3339");
    assert!(stamp.with_timezone(&chrono::Utc) + chrono::Duration::seconds(1) >= before);
}

#[test]
fn test_record_version_without_lock_fails() {
    let dir = TempDir::new().unwrap();
    let err = config::record_version(dir.path(), "1.2.3").unwrap_err();
    assert!(matches!(err, GhcError::ConfigMissing(_)));
}

#[test]
fn test_repo_url_validation() {
    assert!(config::is_repo_url("https://github.com/acme/widget"));
    assert!(config::is_repo_url("https://github.com/acme/widget.git"));
    assert!(config::is_repo_url("git@github.com:acme/widget.git"));

    assert!(!config::is_repo_url(""));
    assert!(!config::is_repo_url("github.com/acme/widget"));
    assert!(!config::is_repo_url("https://gitlab.com/acme/widget"));
    assert!(!config::is_repo_url("ssh://github.com/acme/widget"));
    assert!(!config::is_repo_url("https://github.com/"));
}
