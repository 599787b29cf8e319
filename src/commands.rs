use std::path::Path;

use crate::config::{self, defaults, ReleaseConfig, RepoLock};
use crate::error::{GhcError, Result};
use crate::git::{Git2Backend, GitBackend};
use crate::pipeline::{self, ReleasePipeline};
use crate::ui;

/// Create the default configuration and lock file in `project`.
///
/// Running it twice is harmless: an initialized project is reported and
/// left untouched.
pub fn init(project: &Path) -> Result<()> {
    if config::config_path(project).exists() {
        ui::display_status("Project is already initialized");
        return Ok(());
    }

    let cfg = ReleaseConfig::default();
    config::save_config(project, &cfg)?;

    let lock = RepoLock {
        branch: cfg.branch.clone(),
        ..RepoLock::default()
    };
    config::save_lock(project, &lock)?;

    ui::display_success(&format!("Created {}", defaults::CONFIG_FILE));
    ui::display_success(&format!("Created {}", defaults::LOCK_FILE));
    ui::display_status("Bind a repository with `ghc bind <repo-url>`");
    Ok(())
}

/// Bind the project to a remote repository URL.
pub fn bind(project: &Path, url: &str) -> Result<()> {
    if !config::is_repo_url(url) {
        return Err(GhcError::invalid_input(format!(
            "'{}' does not look like a GitHub repository URL \
             (expected https://github.com/... or git@github.com:...)",
            url
        )));
    }

    let mut cfg = config::load_config(project)?;
    cfg.repo = url.to_string();
    config::save_config(project, &cfg)?;

    // Binding starts release tracking from scratch
    let lock = RepoLock {
        repo: url.to_string(),
        branch: cfg.branch.clone(),
        ..RepoLock::default()
    };
    config::save_lock(project, &lock)?;

    ui::display_success(&format!("Repository bound: {}", url));
    Ok(())
}

/// Show the current binding and release configuration.
pub fn status(project: &Path) -> Result<()> {
    let cfg = config::load_config(project)?;

    if cfg.repo.trim().is_empty() {
        ui::display_status("No repository bound (run `ghc bind <repo-url>` first)");
        return Ok(());
    }

    println!("Project configuration:");
    ui::display_key_value("repo", &cfg.repo);
    ui::display_key_value("branch", &cfg.branch);
    ui::display_key_value("version", &cfg.version);
    ui::display_key_value("tag prefix", &cfg.tag_prefix);
    ui::display_key_value("auto push", &cfg.auto_push.to_string());
    ui::display_key_value("build command", &cfg.build_command);
    Ok(())
}

/// Create and push a release tag, then record it in the lock.
pub fn tag_create(project: &Path, version: &str) -> Result<()> {
    let version = version.trim();
    if version.is_empty() {
        return Err(GhcError::invalid_input("tag version must not be empty"));
    }

    let backend = open_backend(project)?;
    backend.validate()?;
    pipeline::tag_release(&backend, version)?;
    record_version(project, version);

    ui::display_success(&format!("Tag '{}' created and pushed", version));
    Ok(())
}

/// List all tags with the latest highlighted.
pub fn tag_list(project: &Path) -> Result<()> {
    let backend = open_backend(project)?;
    let tags = backend.list_tags()?;

    if tags.is_empty() {
        ui::display_status("No tags found");
        return Ok(());
    }

    println!("Tags:");
    for tag in &tags {
        println!("  {}", tag);
    }
    if let Ok(latest) = backend.latest_tag() {
        ui::display_status(&format!("Latest: {}", latest));
    }
    Ok(())
}

/// Check out the revision a tag points to.
pub fn tag_checkout(project: &Path, version: &str) -> Result<()> {
    let version = version.trim();
    if version.is_empty() {
        return Err(GhcError::invalid_input("tag version must not be empty"));
    }

    let backend = open_backend(project)?;
    backend.validate()?;
    backend.checkout_tag(version)?;
    record_version(project, version);

    ui::display_success(&format!("Checked out tag '{}'", version));
    Ok(())
}

/// Run the release pipeline.
///
/// Version resolution order: explicit argument, configured version,
/// fixed fallback.
pub fn publish(project: &Path, version: Option<&str>) -> Result<()> {
    let version = match version {
        Some(v) => {
            let v = v.trim();
            if v.is_empty() {
                return Err(GhcError::invalid_input("release version must not be empty"));
            }
            v.to_string()
        }
        None => {
            let cfg = config::load_config(project)?;
            if cfg.version.trim().is_empty() {
                defaults::PUBLISH_VERSION.to_string()
            } else {
                cfg.version
            }
        }
    };

    let cfg = match config::load_config(project) {
        Ok(cfg) => cfg,
        Err(GhcError::ConfigMissing(_)) => ReleaseConfig::default(),
        Err(e) => return Err(e),
    };

    ui::display_status(&format!("Publishing release {}", version));
    ReleasePipeline::new(project, cfg).run(&version)?;
    ui::display_success(&format!("Release {} published", version));
    Ok(())
}

fn open_backend(project: &Path) -> Result<Git2Backend> {
    if !Git2Backend::is_repository(project) {
        return Err(GhcError::repository(format!(
            "{} is not a git repository (run `ghc publish` to create one)",
            project.display()
        )));
    }
    Git2Backend::open(project)
}

/// Lock updates after a successful operation never fail the command.
fn record_version(project: &Path, version: &str) {
    if let Err(e) = config::record_version(project, version) {
        ui::display_warning(&format!("could not update repo lock: {}", e));
    }
}
