//! Source-control operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! the release stages need, allowing for multiple implementations including
//! real repositories and mock implementations for testing.
//!
//! The primary abstraction is the [GitClient] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Client]: a real implementation using the `git2` crate
//! - [mock::MockGitClient]: a recording implementation for tests
//!
//! Stage orchestration depends on the trait rather than a concrete
//! implementation, so the whole pipeline can be exercised without a real
//! repository or network access.

pub mod mock;
pub mod repository;

pub use mock::MockGitClient;
pub use repository::Git2Client;

use std::path::Path;

use crate::error::Result;
use crate::remote::RemoteTarget;

/// Source-control operations required by the release stages.
///
/// Every operation is fail-fast: an error from any method aborts the
/// invoking stage and is propagated unchanged.
///
/// Implementors must be `Send + Sync` to allow safe sharing across threads.
pub trait GitClient: Send + Sync {
    /// List all tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Fetch tags from the remote target
    fn fetch_tags(&self, target: &RemoteTarget) -> Result<()>;

    /// Stage a file, given its path relative to the repository root
    fn stage_file(&self, path: &Path) -> Result<()>;

    /// Create a commit from the staged state with the given message.
    ///
    /// Committing is allowed even when the staged tree is identical to
    /// HEAD, so a release commit exists for every pipeline run.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create a lightweight tag pointing at HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push the current branch and the named tag to the remote target
    fn push(&self, target: &RemoteTarget, tag_name: &str) -> Result<()>;
}
