use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{ErrorCode, IndexAddOption, Repository, Signature};

use crate::error::{GhcError, Result};
use crate::git::{
    GitBackend, REMOTE_NAME, SHORT_HASH_LEN, TOOL_SIGNATURE_EMAIL, TOOL_SIGNATURE_NAME,
};

fn tag_ref(name: &str) -> String {
    format!("refs/tags/{}", name)
}

/// Version control adapter backed by a working copy via `git2`
pub struct Git2Backend {
    repo: Repository,
}

// Manual impl: `git2::Repository` itself carries no `Debug`
impl std::fmt::Debug for Git2Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git2Backend")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git2Backend {
    /// Open the repository located exactly at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path.as_ref()).map_err(|e| {
            GhcError::repository(format!(
                "{} is not a git repository: {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;
        Ok(Git2Backend { repo })
    }

    /// Initialize a new repository at `path` and open it.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::init(path.as_ref()).map_err(|e| {
            GhcError::repository(format!(
                "could not initialize repository at {}: {}",
                path.as_ref().display(),
                e.message()
            ))
        })?;
        Ok(Git2Backend { repo })
    }

    /// Check whether `path` holds a git repository.
    pub fn is_repository<P: AsRef<Path>>(path: P) -> bool {
        Repository::open(path.as_ref()).is_ok()
    }

    /// Committer identity: repository config, else the tool signature.
    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig),
            Err(_) => Ok(Signature::now(TOOL_SIGNATURE_NAME, TOOL_SIGNATURE_EMAIL)?),
        }
    }
}

impl GitBackend for Git2Backend {
    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.repo.find_reference(&tag_ref(name)).is_ok() {
            return Err(GhcError::tag(format!("tag '{}' already exists", name)));
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = Signature::now(TOOL_SIGNATURE_NAME, TOOL_SIGNATURE_EMAIL)?;
        self.repo
            .tag(name, head.as_object(), &tagger, message, false)
            .map_err(|e| {
                GhcError::tag(format!("could not create tag '{}': {}", name, e.message()))
            })?;

        Ok(())
    }

    fn push_tag(&self, name: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(REMOTE_NAME).map_err(|e| {
            GhcError::remote(format!(
                "cannot find remote '{}': {}",
                REMOTE_NAME,
                e.message()
            ))
        })?;

        let refspec = format!("{}:{}", tag_ref(name), tag_ref(name));
        remote.push(&[&refspec], None).map_err(|e| {
            GhcError::remote(format!("could not push tag '{}': {}", name, e.message()))
        })?;

        Ok(())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        let mut names: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        names.sort();
        Ok(names)
    }

    fn checkout_tag(&self, name: &str) -> Result<()> {
        let reference = match self.repo.find_reference(&tag_ref(name)) {
            Ok(reference) => reference,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(GhcError::tag(format!("tag '{}' not found", name)))
            }
            Err(e) => return Err(e.into()),
        };

        let commit = reference.peel_to_commit().map_err(|e| {
            GhcError::tag(format!("cannot resolve tag '{}': {}", name, e.message()))
        })?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo
            .checkout_tree(commit.as_object(), Some(&mut checkout))?;
        self.repo.set_head_detached(commit.id())?;

        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(name.to_string());
            }
        }

        // Detached HEAD: report a short revision prefix instead
        let oid = head
            .target()
            .ok_or_else(|| GhcError::repository("HEAD does not point at a commit"))?;
        let hash = oid.to_string();
        Ok(hash[..SHORT_HASH_LEN].to_string())
    }

    fn remote_url(&self) -> Result<String> {
        let remote = self.repo.find_remote(REMOTE_NAME).map_err(|e| {
            GhcError::remote(format!(
                "cannot find remote '{}': {}",
                REMOTE_NAME,
                e.message()
            ))
        })?;

        remote
            .url()
            .map(|url| url.to_string())
            .ok_or_else(|| GhcError::remote(format!("remote '{}' has no usable URL", REMOTE_NAME)))
    }

    fn add_remote(&self, url: &str) -> Result<()> {
        self.repo.remote(REMOTE_NAME, url).map_err(|e| {
            GhcError::remote(format!(
                "could not add remote '{}': {}",
                REMOTE_NAME,
                e.message()
            ))
        })?;
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };

        // An index identical to HEAD means there is nothing to commit
        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Ok(());
            }
        }

        let sig = self.signature()?;
        match &parent {
            Some(parent) => {
                self.repo
                    .commit(Some("HEAD"), &sig, &sig, message, &tree, &[parent])?
            }
            None => self
                .repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &[])?,
        };

        Ok(())
    }

    fn push_branch(&self, branch: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(REMOTE_NAME).map_err(|e| {
            GhcError::remote(format!(
                "cannot find remote '{}': {}",
                REMOTE_NAME,
                e.message()
            ))
        })?;

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote.push(&[&refspec], None).map_err(|e| {
            GhcError::remote(format!(
                "could not push branch '{}': {}",
                branch,
                e.message()
            ))
        })?;

        // Record the upstream so a later plain `git push` works
        let mut config = self.repo.config()?;
        config.set_str(&format!("branch.{}.remote", branch), REMOTE_NAME)?;
        config.set_str(
            &format!("branch.{}.merge", branch),
            &format!("refs/heads/{}", branch),
        )?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        // Best effort: a dirty tree is reported, never fatal
        if let Ok(statuses) = self.repo.statuses(None) {
            let dirty = statuses
                .iter()
                .filter(|entry| {
                    let s = entry.status();
                    s.is_index_new()
                        || s.is_index_modified()
                        || s.is_index_deleted()
                        || s.is_wt_new()
                        || s.is_wt_modified()
                        || s.is_wt_deleted()
                })
                .count();
            if dirty > 0 {
                eprintln!(
                    "Warning: {} uncommitted change(s) in the working tree",
                    dirty
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_plain_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Git2Backend::open(dir.path()).unwrap_err();
        assert!(matches!(err, GhcError::Repository(_)));
    }

    #[test]
    fn test_init_then_probe() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!Git2Backend::is_repository(dir.path()));

        Git2Backend::init(dir.path()).unwrap();
        assert!(Git2Backend::is_repository(dir.path()));
        assert!(Git2Backend::open(dir.path()).is_ok());
    }

    #[test]
    fn test_validate_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Git2Backend::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("untracked.txt"), "dirty").unwrap();
        assert!(backend.validate().is_ok());
    }
}
