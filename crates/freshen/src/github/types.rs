//! Wire types for the subset of the GitHub REST API the presenter reads.

use serde::Deserialize;

/// Response of `GET /repos/{owner}/{repo}/compare/{base}...{head}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitsComparison {
    #[serde(default)]
    pub commits: Option<Vec<RepositoryCommit>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryCommit {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    #[serde(default)]
    pub comment_count: u32,
}

/// Response of `GET /users/{login}`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
