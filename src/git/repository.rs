use std::path::Path;

use git2::Repository;

use crate::error::{ReleaseError, Result};
use crate::git::GitClient;
use crate::remote::RemoteTarget;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Client {
    repo: Repository,
    identity: Option<String>,
}

impl Git2Client {
    /// Open or discover a git repository starting at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;

        Ok(Git2Client {
            repo,
            identity: None,
        })
    }

    /// Discover the repository containing the current working directory
    pub fn discover() -> Result<Self> {
        Self::open(".")
    }

    /// Set the identity used for commits when the repository has no
    /// configured signature (common on CI runners)
    pub fn with_identity(mut self, identity: Option<String>) -> Self {
        self.identity = identity;
        self
    }

    fn signature(&self) -> Result<git2::Signature<'static>> {
        if let Ok(sig) = self.repo.signature() {
            return Ok(sig);
        }

        let name = self.identity.as_deref().unwrap_or("automation");
        let email = format!("{}@users.noreply.github.com", name);
        Ok(git2::Signature::now(name, &email)?)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseError::remote(
                "HEAD is not on a branch; cannot determine what to push",
            ));
        }
        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| ReleaseError::remote("Branch name is not valid UTF-8"))
    }
}

impl GitClient for Git2Client {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn fetch_tags(&self, target: &RemoteTarget) -> Result<()> {
        let mut remote = self.repo.remote_anonymous(&target.url())?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(target.callbacks());

        remote
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| {
                ReleaseError::remote(format!(
                    "Failed to fetch tags from '{}': {}",
                    target.url(),
                    e
                ))
            })?;

        Ok(())
    }

    fn stage_file(&self, path: &Path) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(path)?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.signature()?;

        // An unborn HEAD gets a parentless commit; identical trees are
        // committed anyway, matching `git commit --allow-empty`.
        match self.repo.head().ok().and_then(|head| head.target()) {
            Some(oid) => {
                let parent = self.repo.find_commit(oid)?;
                self.repo.commit(
                    Some("HEAD"),
                    &signature,
                    &signature,
                    message,
                    &tree,
                    &[&parent],
                )?;
            }
            None => {
                self.repo
                    .commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?;
            }
        }

        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;

        Ok(())
    }

    fn push(&self, target: &RemoteTarget, tag_name: &str) -> Result<()> {
        let mut remote = self.repo.remote_anonymous(&target.url())?;

        let mut callbacks = target.callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let branch = self.current_branch()?;
        let refspecs = [
            format!("refs/heads/{}:refs/heads/{}", branch, branch),
            format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name),
        ];
        let refspec_strs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();

        remote
            .push(&refspec_strs, Some(&mut push_options))
            .map_err(|e| {
                if e.class() == git2::ErrorClass::Net {
                    ReleaseError::remote(format!("Network error during push: {}", e))
                } else {
                    ReleaseError::remote(format!("Failed to push '{}': {}", tag_name, e))
                }
            })?;

        Ok(())
    }
}

// SAFETY: Git2Client wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Client {}
