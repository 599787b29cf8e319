//! Version control abstraction layer
//!
//! This module provides a trait-based abstraction over the repository
//! operations ghc needs, with a real implementation on top of the `git2`
//! crate and an in-memory implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [GitBackend] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Backend]: A real implementation using the `git2` crate
//! - [mock::MemoryBackend]: An in-memory implementation for testing
//!
//! # Usage
//!
//! Release logic should depend on the [GitBackend] trait rather than a
//! concrete implementation so that it stays testable without a repository.
//!
//! ```rust
//! # use ghc::git::GitBackend;
//! # fn example(backend: &dyn GitBackend) -> ghc::error::Result<()> {
//! for tag in backend.list_tags()? {
//!     println!("{}", tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MemoryBackend;
pub use repository::Git2Backend;

use crate::error::{GhcError, Result};

/// Remote name all pushes go to.
pub const REMOTE_NAME: &str = "origin";

/// Identity used for tags and for commits when the repository has none.
pub const TOOL_SIGNATURE_NAME: &str = "ghc";
pub const TOOL_SIGNATURE_EMAIL: &str = "ghc@tool.local";

/// Length of the revision prefix reported for a detached HEAD.
pub const SHORT_HASH_LEN: usize = 8;

/// Repository operations needed to drive a release
///
/// All methods take `&self`; ghc is single-threaded and implementations
/// are free to use interior mutability. Errors map to the matching
/// [crate::error::GhcError] variants: `Tag` for tag-domain failures,
/// `Remote` for transport failures, `Repository` for repository state.
pub trait GitBackend {
    /// Create an annotated tag named `name` at the current HEAD.
    ///
    /// The tagger identity is fixed to the tool signature so tags are
    /// recognizable independently of local git configuration.
    ///
    /// # Arguments
    /// * `name` - Tag name, used verbatim
    /// * `message` - Annotation message
    ///
    /// # Returns
    /// * `Ok(())` - Tag created
    /// * `Err(Tag)` - A tag of that name already exists
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push `refs/tags/{name}` to the remote.
    fn push_tag(&self, name: &str) -> Result<()>;

    /// All tag names, lexicographically sorted. May be empty.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Latest tag by lexicographic order.
    ///
    /// Defined as the last element of [GitBackend::list_tags].
    ///
    /// # Returns
    /// * `Ok(String)` - The latest tag name
    /// * `Err(Tag)` - The repository has no tags
    fn latest_tag(&self) -> Result<String> {
        let tags = self.list_tags()?;
        tags.into_iter()
            .last()
            .ok_or_else(|| GhcError::tag("no tags found"))
    }

    /// Check out the commit a tag points to, detaching HEAD.
    ///
    /// # Arguments
    /// * `name` - Tag name to check out
    ///
    /// # Returns
    /// * `Ok(())` - Working tree now matches the tagged revision
    /// * `Err(Tag)` - No tag of that name exists
    fn checkout_tag(&self, name: &str) -> Result<()>;

    /// Name of the current branch.
    ///
    /// On a detached HEAD this reports the first [SHORT_HASH_LEN]
    /// characters of the commit hash instead.
    fn current_branch(&self) -> Result<String>;

    /// URL of the configured remote.
    fn remote_url(&self) -> Result<String>;

    /// Add the remote pointing at `url`. Fails if one already exists.
    fn add_remote(&self, url: &str) -> Result<()>;

    /// Stage every change in the working tree (`git add .` semantics).
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged tree.
    ///
    /// An empty stage is a successful no-op so re-running a release does
    /// not fail on the commit step.
    fn commit(&self, message: &str) -> Result<()>;

    /// Push `refs/heads/{branch}` to the remote and record the upstream
    /// tracking relation.
    fn push_branch(&self, branch: &str) -> Result<()>;

    /// Best-effort repository validation.
    ///
    /// Always succeeds in the current design; implementations may warn
    /// about suspicious state but must not fail.
    fn validate(&self) -> Result<()>;
}
