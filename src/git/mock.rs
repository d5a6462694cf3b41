use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::git::GitClient;
use crate::remote::RemoteTarget;

/// Mock git client for testing without a repository or network.
///
/// Serves a preloaded tag list and records every side-effecting call so
/// tests can assert on exactly what a stage did.
pub struct MockGitClient {
    tags: Mutex<Vec<String>>,
    fetches: Mutex<Vec<String>>,
    staged: Mutex<Vec<PathBuf>>,
    commits: Mutex<Vec<String>>,
    created: Mutex<Vec<String>>,
    pushes: Mutex<Vec<(String, String)>>,
}

impl MockGitClient {
    /// Create a mock with an empty tag list
    pub fn new() -> Self {
        MockGitClient {
            tags: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            staged: Mutex::new(Vec::new()),
            commits: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// Preload the repository tag list
    pub fn with_tags(self, tags: &[&str]) -> Self {
        *self.tags.lock().unwrap() = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    /// URLs that tags were fetched from, in call order
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    /// Paths staged, in call order
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.staged.lock().unwrap().clone()
    }

    /// Commit messages recorded, in call order
    pub fn commit_messages(&self) -> Vec<String> {
        self.commits.lock().unwrap().clone()
    }

    /// Tags created since construction, in call order
    pub fn created_tags(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    /// (url, tag) pairs pushed, in call order
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }
}

impl Default for MockGitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitClient for MockGitClient {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.lock().unwrap().clone())
    }

    fn fetch_tags(&self, target: &RemoteTarget) -> Result<()> {
        self.fetches.lock().unwrap().push(target.url());
        Ok(())
    }

    fn stage_file(&self, path: &Path) -> Result<()> {
        self.staged.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.commits.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.created.lock().unwrap().push(name.to_string());
        self.tags.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn push(&self, target: &RemoteTarget, tag_name: &str) -> Result<()> {
        self.pushes
            .lock()
            .unwrap()
            .push((target.url(), tag_name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> RemoteTarget {
        RemoteTarget::new("github.com", "example-org", "example-repo")
    }

    #[test]
    fn test_mock_serves_preloaded_tags() {
        let mock = MockGitClient::new().with_tags(&["v1.0.0", "v1.0.1"]);
        assert_eq!(mock.list_tags().unwrap(), vec!["v1.0.0", "v1.0.1"]);
    }

    #[test]
    fn test_mock_records_fetches() {
        let mock = MockGitClient::new();
        mock.fetch_tags(&target()).unwrap();
        assert_eq!(
            mock.fetched_urls(),
            vec!["https://github.com/example-org/example-repo.git"]
        );
    }

    #[test]
    fn test_mock_records_staging_and_commits() {
        let mock = MockGitClient::new();
        mock.stage_file(Path::new("VERSION")).unwrap();
        mock.commit("ci: release of version v1.0.0").unwrap();

        assert_eq!(mock.staged_paths(), vec![PathBuf::from("VERSION")]);
        assert_eq!(mock.commit_messages(), vec!["ci: release of version v1.0.0"]);
    }

    #[test]
    fn test_mock_created_tags_become_listable() {
        let mock = MockGitClient::new().with_tags(&["v1.0.0"]);
        mock.create_tag("v1.0.1").unwrap();
        assert_eq!(mock.created_tags(), vec!["v1.0.1"]);
        assert_eq!(mock.list_tags().unwrap(), vec!["v1.0.0", "v1.0.1"]);
    }

    #[test]
    fn test_mock_records_pushes() {
        let mock = MockGitClient::new();
        mock.push(&target(), "v1.0.1").unwrap();
        assert_eq!(
            mock.pushed(),
            vec![(
                "https://github.com/example-org/example-repo.git".to_string(),
                "v1.0.1".to_string()
            )]
        );
    }
}
