//! Remote repository coordinates and credentials.

use crate::error::{ReleaseError, Result};

/// Environment variable holding the automation token used for
/// authenticated fetch and push operations
pub const TOKEN_ENV: &str = "AUTOMATION_USER_TOKEN";

/// Coordinates and credentials for the remote repository.
///
/// Credentials are supplied to git through a callback rather than being
/// embedded in the remote URL, so they never appear in diagnostics.
#[derive(Debug, Clone)]
pub struct RemoteTarget {
    pub host: String,
    pub organization: String,
    pub repository: String,
    pub username: Option<String>,
    pub token: Option<String>,
}

impl RemoteTarget {
    /// Create a target without credentials
    pub fn new(
        host: impl Into<String>,
        organization: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        RemoteTarget {
            host: host.into(),
            organization: organization.into(),
            repository: repository.into(),
            username: None,
            token: None,
        }
    }

    /// Attach the username and token used for authenticated operations
    pub fn with_credentials(mut self, username: Option<String>, token: Option<String>) -> Self {
        self.username = username;
        self.token = token;
        self
    }

    /// The HTTPS URL of the remote repository, without credentials
    pub fn url(&self) -> String {
        format!(
            "https://{}/{}/{}.git",
            self.host, self.organization, self.repository
        )
    }

    /// Verify that both username and token are present.
    ///
    /// Called before any stage that must push, so a misconfigured pipeline
    /// fails before touching the repository.
    pub fn require_credentials(&self) -> Result<()> {
        if self.username.is_none() {
            return Err(ReleaseError::config(
                "a username is required for pushing (--username or ci-release.toml)",
            ));
        }
        if self.token.is_none() {
            return Err(ReleaseError::config(format!(
                "the {} environment variable must be set for pushing",
                TOKEN_ENV
            )));
        }
        Ok(())
    }

    /// Build the remote callbacks used for fetch and push.
    ///
    /// When both username and token are present they are offered as
    /// plaintext userpass credentials; otherwise git's default credential
    /// resolution applies (sufficient for fetching from public remotes).
    pub fn callbacks(&self) -> git2::RemoteCallbacks<'static> {
        let username = self.username.clone();
        let token = self.token.clone();

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |_url, _username_from_url, _allowed_types| {
            match (username.as_deref(), token.as_deref()) {
                (Some(user), Some(token)) => git2::Cred::userpass_plaintext(user, token),
                _ => git2::Cred::default(),
            }
        });
        callbacks
    }
}
