//! GitHub API client creation and management.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use serde::de::DeserializeOwned;

use super::error::{GitHubError, error_from_response};
use super::types::{CommitsComparison, User};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpRequest, HttpTransport};

/// Default GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

const USER_AGENT: &str = "freshen";
const ACCEPT: &str = "application/vnd.github+json";

/// Connection settings for [`GitHubClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// API base URL; override for GitHub Enterprise.
    pub api_url: String,
    /// Optional token, sent as a bearer credential.
    pub token: Option<String>,
    pub timeout: StdDuration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GitHubConfig {
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read-only GitHub REST client.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client backed by a real HTTP transport.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = GitHubClient::new(&GitHubConfig::default().with_token("ghp_..."))?;
    /// let user = client.get_user("gopherjs").await?;
    /// ```
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        if config.api_url.trim().is_empty() {
            return Err(GitHubError::Config("api_url must not be empty".to_string()));
        }
        let transport = ReqwestTransport::with_timeout(config.timeout)
            .map_err(|e| GitHubError::Config(e.to_string()))?;

        Ok(Self::new_with_transport(config, Arc::new(transport)))
    }

    pub fn new_with_transport(config: &GitHubConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config
                .token
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Make a GET request against `path` and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GitHubError> {
        let url = format!("{}{}", self.api_url, path);

        let mut request = HttpRequest::get(url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(error_from_response(&response));
        }

        serde_json::from_slice(&response.body).map_err(GitHubError::Json)
    }

    /// Compare two revisions of a repository.
    pub async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<CommitsComparison, GitHubError> {
        tracing::debug!(owner, repo, base, head, "Comparing commits");
        self.get(&format!("/repos/{owner}/{repo}/compare/{base}...{head}"))
            .await
    }

    /// Look up a user or organization by login.
    pub async fn get_user(&self, login: &str) -> Result<User, GitHubError> {
        tracing::debug!(login, "Fetching user");
        self.get(&format!("/users/{login}")).await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
