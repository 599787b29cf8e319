use std::path::PathBuf;

use crate::command::CommandRunner;
use crate::config::{self, defaults, ReleaseConfig};
use crate::error::{GhcError, Result};
use crate::git::{Git2Backend, GitBackend};
use crate::hooks::PreBuildRunner;
use crate::ui;

/// Steps of the release pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Build,
    RepositoryCheck,
    RemoteSetup,
    Commit,
    Push,
    Tag,
}

impl PipelineStep {
    /// All steps in execution order.
    pub const ALL: [PipelineStep; 6] = [
        PipelineStep::Build,
        PipelineStep::RepositoryCheck,
        PipelineStep::RemoteSetup,
        PipelineStep::Commit,
        PipelineStep::Push,
        PipelineStep::Tag,
    ];

    /// Label shown when the step starts.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStep::Build => "building project",
            PipelineStep::RepositoryCheck => "checking repository",
            PipelineStep::RemoteSetup => "setting up remote",
            PipelineStep::Commit => "committing changes",
            PipelineStep::Push => "pushing to remote",
            PipelineStep::Tag => "creating release tag",
        }
    }

    /// Label shown when the step completes.
    pub fn done_label(&self) -> &'static str {
        match self {
            PipelineStep::Build => "project built",
            PipelineStep::RepositoryCheck => "repository ready",
            PipelineStep::RemoteSetup => "remote configured",
            PipelineStep::Commit => "changes committed",
            PipelineStep::Push => "branch pushed",
            PipelineStep::Tag => "release tagged",
        }
    }
}

/// Drives the release sequence for one project directory.
///
/// The order is fixed: build, repository check, remote setup, commit,
/// push, tag. The first failing step aborts the run; completed steps are
/// not rolled back.
pub struct ReleasePipeline {
    project: PathBuf,
    config: ReleaseConfig,
    backend: Option<Git2Backend>,
}

impl ReleasePipeline {
    pub fn new(project: impl Into<PathBuf>, config: ReleaseConfig) -> Self {
        ReleasePipeline {
            project: project.into(),
            config,
            backend: None,
        }
    }

    /// Run the whole pipeline for `version`.
    pub fn run(&mut self, version: &str) -> Result<()> {
        let total = PipelineStep::ALL.len();
        for (idx, step) in PipelineStep::ALL.iter().enumerate() {
            ui::display_status(&format!("Step {}/{}: {}...", idx + 1, total, step.label()));
            self.execute(*step, version)?;
            ui::display_success(step.done_label());
        }
        Ok(())
    }

    fn execute(&mut self, step: PipelineStep, version: &str) -> Result<()> {
        match step {
            PipelineStep::Build => self.build(),
            PipelineStep::RepositoryCheck => self.check_repository(),
            PipelineStep::RemoteSetup => setup_remote(self.backend()?, &self.config.repo),
            PipelineStep::Commit => self.commit(version),
            PipelineStep::Push => self.push(),
            PipelineStep::Tag => self.tag(version),
        }
    }

    /// The backend opened by the repository-check step.
    fn backend(&self) -> Result<&Git2Backend> {
        self.backend
            .as_ref()
            .ok_or_else(|| GhcError::repository("repository is not open yet"))
    }

    fn build(&self) -> Result<()> {
        PreBuildRunner::new(&self.config.pre_build).run()?;

        let build_command = if self.config.build_command.trim().is_empty() {
            defaults::BUILD_COMMAND
        } else {
            self.config.build_command.as_str()
        };
        CommandRunner::run(build_command)
    }

    fn check_repository(&mut self) -> Result<()> {
        let backend = if Git2Backend::is_repository(&self.project) {
            Git2Backend::open(&self.project)?
        } else {
            ui::display_status("No repository found, initializing one");
            Git2Backend::init(&self.project)?
        };
        self.backend = Some(backend);
        Ok(())
    }

    fn commit(&self, version: &str) -> Result<()> {
        let backend = self.backend()?;
        backend.stage_all()?;
        backend.commit(&release_message(version))
    }

    fn push(&self) -> Result<()> {
        let backend = self.backend()?;
        let branch = resolve_branch(backend, &self.config);
        backend.push_branch(&branch)
    }

    fn tag(&self, version: &str) -> Result<()> {
        tag_release(self.backend()?, version)?;

        // Release state is bookkeeping once the tag is out
        if let Err(e) = config::record_version(&self.project, version) {
            ui::display_warning(&format!("could not update repo lock: {}", e));
        }

        // Only update a configuration that actually exists on disk
        if let Ok(mut cfg) = config::load_config(&self.project) {
            cfg.version = version.to_string();
            if let Err(e) = config::save_config(&self.project, &cfg) {
                ui::display_warning(&format!("could not update configuration: {}", e));
            }
        }

        Ok(())
    }
}

/// Ensure the bound repository URL is configured as the remote.
///
/// Idempotent: an existing remote is left untouched, whatever URL it
/// carries.
pub(crate) fn setup_remote(backend: &dyn GitBackend, repo_url: &str) -> Result<()> {
    if repo_url.trim().is_empty() {
        return Err(GhcError::config(
            "no repository bound (run `ghc bind <repo-url>` first)",
        ));
    }

    match backend.remote_url() {
        Ok(url) => {
            ui::display_status(&format!("Remote already configured: {}", url));
            Ok(())
        }
        Err(_) => backend.add_remote(repo_url),
    }
}

/// Branch to push: the adapter's current branch, else the configured
/// branch, else the default.
pub(crate) fn resolve_branch(backend: &dyn GitBackend, config: &ReleaseConfig) -> String {
    if let Ok(branch) = backend.current_branch() {
        if !branch.is_empty() {
            return branch;
        }
    }
    if !config.branch.trim().is_empty() {
        return config.branch.clone();
    }
    defaults::BRANCH.to_string()
}

/// Create and push the annotated release tag for `version`.
pub(crate) fn tag_release(backend: &dyn GitBackend, version: &str) -> Result<()> {
    backend.create_tag(version, &release_message(version))?;
    backend.push_tag(version)
}

/// Commit and tag annotation message for a release.
pub(crate) fn release_message(version: &str) -> String {
    format!("Release version {}", version)
}
