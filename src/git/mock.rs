use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::{GhcError, Result};
use crate::git::{GitBackend, SHORT_HASH_LEN};

const FAKE_HEAD: &str = "8f2a9c41d7e305b6f4a2c8d91e0b7a6352c4d8e9";

#[derive(Default)]
struct MemoryState {
    // BTreeMap keeps tag listings sorted by construction
    tags: BTreeMap<String, String>,
    pushed_tags: Vec<String>,
    remote: Option<String>,
    branch: Option<String>,
    head: String,
    checked_out: Option<String>,
    staged: bool,
    commits: Vec<String>,
    pushed_branches: Vec<String>,
}

/// In-memory backend for testing without a repository on disk
///
/// Honors the same contracts as the real backend: duplicate tags are
/// rejected, pushes require a remote, and a missing branch reports a
/// short revision prefix.
pub struct MemoryBackend {
    state: RefCell<MemoryState>,
}

impl MemoryBackend {
    /// Create an empty backend: no tags, no remote, detached HEAD.
    pub fn new() -> Self {
        MemoryBackend {
            state: RefCell::new(MemoryState {
                head: FAKE_HEAD.to_string(),
                ..MemoryState::default()
            }),
        }
    }

    /// Put the backend on a named branch.
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.state.borrow_mut().branch = Some(branch.into());
    }

    /// Configure the remote URL.
    pub fn set_remote(&mut self, url: impl Into<String>) {
        self.state.borrow_mut().remote = Some(url.into());
    }

    /// Seed a tag with its annotation message.
    pub fn add_tag(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.state.borrow_mut().tags.insert(name.into(), message.into());
    }

    /// Tags pushed so far, in push order.
    pub fn pushed_tags(&self) -> Vec<String> {
        self.state.borrow().pushed_tags.clone()
    }

    /// Branches pushed so far, in push order.
    pub fn pushed_branches(&self) -> Vec<String> {
        self.state.borrow().pushed_branches.clone()
    }

    /// Commit messages recorded so far.
    pub fn commits(&self) -> Vec<String> {
        self.state.borrow().commits.clone()
    }

    /// The configured remote URL, if any.
    pub fn remote(&self) -> Option<String> {
        self.state.borrow().remote.clone()
    }

    /// The tag last checked out, if any.
    pub fn checked_out(&self) -> Option<String> {
        self.state.borrow().checked_out.clone()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GitBackend for MemoryBackend {
    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.tags.contains_key(name) {
            return Err(GhcError::tag(format!("tag '{}' already exists", name)));
        }
        state.tags.insert(name.to_string(), message.to_string());
        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.tags.contains_key(name) {
            return Err(GhcError::tag(format!("tag '{}' not found", name)));
        }
        if state.remote.is_none() {
            return Err(GhcError::remote("cannot find remote 'origin'"));
        }
        state.pushed_tags.push(name.to_string());
        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.state.borrow().tags.keys().cloned().collect())
    }

    fn checkout_tag(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.tags.contains_key(name) {
            return Err(GhcError::tag(format!("tag '{}' not found", name)));
        }
        state.checked_out = Some(name.to_string());
        state.branch = None;
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let state = self.state.borrow();
        match &state.branch {
            Some(branch) => Ok(branch.clone()),
            None => Ok(state.head[..SHORT_HASH_LEN].to_string()),
        }
    }

    fn remote_url(&self) -> Result<String> {
        self.state
            .borrow()
            .remote
            .clone()
            .ok_or_else(|| GhcError::remote("cannot find remote 'origin'"))
    }

    fn add_remote(&self, url: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.remote.is_some() {
            return Err(GhcError::remote("remote 'origin' already exists"));
        }
        state.remote = Some(url.to_string());
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.state.borrow_mut().staged = true;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.commits.push(message.to_string());
        state.staged = false;
        Ok(())
    }

    fn push_branch(&self, branch: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.remote.is_none() {
            return Err(GhcError::remote("cannot find remote 'origin'"));
        }
        state.pushed_branches.push(branch.to_string());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
