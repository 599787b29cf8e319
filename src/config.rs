use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GhcError, Result};

/// Fixed file names and fallback values used by configuration resolution.
pub mod defaults {
    /// Project configuration file, next to the sources it describes.
    pub const CONFIG_FILE: &str = "ghc.config.toml";
    /// Machine-written release state file.
    pub const LOCK_FILE: &str = ".repo.lock";
    /// Branch used when neither the repository nor the config names one.
    pub const BRANCH: &str = "main";
    /// Build invocation used when the config does not carry one.
    pub const BUILD_COMMAND: &str = "go build ./...";
    /// Version a fresh project starts from.
    pub const VERSION: &str = "0.0.1";
    /// Prefix recorded for tag naming schemes.
    pub const TAG_PREFIX: &str = "v";
    /// Version published when neither the CLI nor the config names one.
    pub const PUBLISH_VERSION: &str = "v1.0.0";
    /// Deadline applied to supervised commands when none is configured.
    pub const COMMAND_TIMEOUT_SECS: u64 = 300;
}

/// Project configuration for ghc.
///
/// Stored as TOML in the project directory and edited by hand or through
/// `ghc init` / `ghc bind`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub repo: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_auto_push")]
    pub auto_push: bool,

    #[serde(default = "default_build_command")]
    pub build_command: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default)]
    pub pre_build: PreBuildConfig,
}

/// Returns the default branch name.
fn default_branch() -> String {
    defaults::BRANCH.to_string()
}

/// Returns the default auto-push setting.
fn default_auto_push() -> bool {
    true
}

/// Returns the default build command.
fn default_build_command() -> String {
    defaults::BUILD_COMMAND.to_string()
}

/// Returns the default project version.
fn default_version() -> String {
    defaults::VERSION.to_string()
}

/// Returns the default tag prefix.
fn default_tag_prefix() -> String {
    defaults::TAG_PREFIX.to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            repo: String::new(),
            branch: default_branch(),
            auto_push: default_auto_push(),
            build_command: default_build_command(),
            version: default_version(),
            tag_prefix: default_tag_prefix(),
            pre_build: PreBuildConfig::default(),
        }
    }
}

/// Pre-build hook configuration.
///
/// Hooks run before the build step of a release. A `timeout` of zero or
/// below means the default command deadline.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PreBuildConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub commands: Vec<String>,

    #[serde(default)]
    pub script: String,

    #[serde(default)]
    pub timeout: i64,

    #[serde(default)]
    pub fail_on_error: bool,
}

/// Release state written by ghc after successful tag operations.
///
/// Never edited by hand. `last_updated` is an RFC 3339 UTC timestamp.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RepoLock {
    #[serde(default)]
    pub repo: String,

    #[serde(default)]
    pub branch: String,

    #[serde(default)]
    pub current_version: String,

    #[serde(default)]
    pub last_updated: String,
}

/// Path of the configuration file inside a project directory.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(defaults::CONFIG_FILE)
}

/// Path of the lock file inside a project directory.
pub fn lock_path(dir: &Path) -> PathBuf {
    dir.join(defaults::LOCK_FILE)
}

/// Loads the project configuration from `dir`.
///
/// # Arguments
/// * `dir` - Project directory holding `ghc.config.toml`
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Parsed configuration
/// * `Err(ConfigMissing)` - No configuration file in `dir`
/// * `Err(Config)` - File exists but cannot be read or parsed
pub fn load_config(dir: &Path) -> Result<ReleaseConfig> {
    let path = config_path(dir);
    if !path.exists() {
        return Err(GhcError::config_missing(format!(
            "{} (run `ghc init` first)",
            path.display()
        )));
    }
    let raw = fs::read_to_string(&path)?;
    toml::from_str(&raw)
        .map_err(|e| GhcError::config(format!("could not parse {}: {}", path.display(), e)))
}

/// Writes the project configuration into `dir`.
pub fn save_config(dir: &Path, config: &ReleaseConfig) -> Result<()> {
    let raw = toml::to_string_pretty(config)
        .map_err(|e| GhcError::config(format!("could not serialize configuration: {}", e)))?;
    fs::write(config_path(dir), raw)?;
    Ok(())
}

/// Loads the release lock from `dir`.
pub fn load_lock(dir: &Path) -> Result<RepoLock> {
    let path = lock_path(dir);
    if !path.exists() {
        return Err(GhcError::config_missing(format!(
            "{} (run `ghc init` first)",
            path.display()
        )));
    }
    let raw = fs::read_to_string(&path)?;
    toml::from_str(&raw)
        .map_err(|e| GhcError::config(format!("could not parse {}: {}", path.display(), e)))
}

/// Writes the release lock into `dir`.
pub fn save_lock(dir: &Path, lock: &RepoLock) -> Result<()> {
    let raw = toml::to_string_pretty(lock)
        .map_err(|e| GhcError::config(format!("could not serialize repo lock: {}", e)))?;
    fs::write(lock_path(dir), raw)?;
    Ok(())
}

/// Records a successfully applied version in the lock file.
///
/// Callers downgrade failures to warnings: the release itself has already
/// succeeded by the time this runs.
pub fn record_version(dir: &Path, version: &str) -> Result<()> {
    let mut lock = load_lock(dir)?;
    lock.current_version = version.to_string();
    lock.last_updated = chrono::Utc::now().to_rfc3339();
    save_lock(dir, &lock)
}

/// Checks whether `url` looks like a bindable GitHub repository URL.
///
/// Accepts the HTTPS and SSH forms.
pub fn is_repo_url(url: &str) -> bool {
    if let Ok(re) = Regex::new(r"^(https://github\.com/|git@github\.com:)\S+") {
        re.is_match(url)
    } else {
        false
    }
}
