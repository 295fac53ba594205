//! Presenter backed by the GitHub compare and users APIs.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use super::client::GitHubClient;
use super::identity::{self, GitHubTarget};
use super::types::{RepositoryCommit, User};
use crate::descriptor::RepositoryDescriptor;
use crate::presenter::{
    Change, ChangeStream, Presenter, PresenterError, Provider, short_error_message,
};

/// Image shown when the owner avatar cannot be fetched.
pub const FALLBACK_IMAGE: &str = "https://github.com/images/gravatars/gravatar-user-420.png";

const GITHUB_PREFIX: &str = "github.com/";

/// Presenter for a repository hosted on (or mirrored to) GitHub.
///
/// All upstream calls happen in [`GitHubPresenter::fetch`]; afterwards the
/// presenter is read-only.
#[derive(Debug)]
pub struct GitHubPresenter {
    repo: Arc<RepositoryDescriptor>,
    target: GitHubTarget,
    image: String,
    changes: Option<Vec<Change>>,
    error: OnceLock<PresenterError>,
}

impl GitHubPresenter {
    /// Fetch the comparison and the owner avatar for `repo`.
    ///
    /// Both requests are issued concurrently. Failures are recorded in the
    /// presenter (comparison first, then avatar) rather than returned.
    pub async fn fetch(
        client: &GitHubClient,
        repo: Arc<RepositoryDescriptor>,
        target: GitHubTarget,
    ) -> Self {
        let (comparison, owner) = tokio::join!(
            client.compare_commits(
                &target.owner,
                &target.repo,
                &repo.local_revision,
                &repo.remote_revision,
            ),
            client.get_user(&target.owner),
        );

        let mut presenter = Self {
            repo,
            target,
            image: FALLBACK_IMAGE.to_string(),
            changes: None,
            error: OnceLock::new(),
        };

        match comparison {
            Ok(cmp) => presenter.changes = cmp.commits.map(|commits| newest_first(&commits)),
            Err(e) => presenter.set_first_error(e.into_presenter_error("compare_commits")),
        }

        match owner {
            Ok(User {
                avatar_url: Some(url),
                ..
            }) if !url.is_empty() => presenter.image = url,
            Ok(_) => {}
            Err(e) => presenter.set_first_error(e.into_presenter_error("get_user")),
        }

        presenter
    }

    /// Record `err` unless an earlier error is already held.
    fn set_first_error(&self, err: PresenterError) {
        if let Err(dropped) = self.error.set(err) {
            tracing::debug!(
                root = %self.repo.root,
                error = %short_error_message(&dropped),
                "Dropping later presenter error"
            );
        }
    }

    pub fn target(&self) -> &GitHubTarget {
        &self.target
    }
}

/// Walk the API list from its end so the result starts with the last commit.
fn newest_first(commits: &[RepositoryCommit]) -> Vec<Change> {
    let len = commits.len();
    (0..len)
        .map(|i| {
            let c = &commits[len - 1 - i];
            Change::new(&c.commit.message, c.html_url.clone(), c.commit.comment_count)
        })
        .collect()
}

impl Presenter for GitHubPresenter {
    fn repo(&self) -> &RepositoryDescriptor {
        &self.repo
    }

    fn home(&self) -> Option<String> {
        if self.repo.root.starts_with(GITHUB_PREFIX) {
            Some(format!(
                "https://github.com/{}/{}",
                self.target.owner, self.target.repo
            ))
        } else {
            Some(format!("http://{}", self.repo.root))
        }
    }

    fn image(&self) -> String {
        self.image.clone()
    }

    fn changes(&self) -> Option<ChangeStream> {
        self.changes.clone().map(ChangeStream::spawn)
    }

    fn error(&self) -> Option<&PresenterError> {
        self.error.get()
    }
}

/// Recognizes GitHub-backed identities and builds [`GitHubPresenter`]s.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn present(&self, repo: &Arc<RepositoryDescriptor>) -> Option<Box<dyn Presenter>> {
        let target = match identity::resolve(repo) {
            Ok(Some(target)) => target,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(root = %repo.root, error = %e, "Ignoring malformed identity");
                return None;
            }
        };

        let presenter = GitHubPresenter::fetch(&self.client, Arc::clone(repo), target).await;
        Some(Box::new(presenter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::GitHubConfig;
    use crate::http::{HttpResponse, MockTransport};

    const API: &str = "https://api.github.com";

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn status(status: u16, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn provider(mock: &MockTransport) -> GitHubProvider {
        let client =
            GitHubClient::new_with_transport(&GitHubConfig::default(), Arc::new(mock.clone()));
        GitHubProvider::new(client)
    }

    fn descriptor(root: &str, remote: &str) -> Arc<RepositoryDescriptor> {
        Arc::new(RepositoryDescriptor::new(root, remote, "aaa", "bbb"))
    }

    fn commit(sha: &str, message: &str, comments: u32) -> String {
        format!(
            r#"{{"sha":"{sha}","html_url":"https://github.com/o/r/commit/{sha}","commit":{{"message":{},"comment_count":{comments}}}}}"#,
            serde_json::to_string(message).expect("encode message")
        )
    }

    fn comparison(commits: &[String]) -> String {
        format!(r#"{{"commits":[{}]}}"#, commits.join(","))
    }

    #[tokio::test]
    async fn test_changes_walk_api_list_from_the_end() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{API}/repos/o/r/compare/aaa...bbb"),
            ok(&comparison(&[
                commit("c0", "zero", 0),
                commit("c1", "one\n\nbody text", 0),
                commit("c2", "two", 4),
            ])),
        );
        mock.push_response(
            format!("{API}/users/o"),
            ok(r#"{"login":"o","avatar_url":"https://avatars.example/o"}"#),
        );

        let presenter = provider(&mock)
            .present(&descriptor("github.com/o/r", ""))
            .await
            .expect("recognized");

        assert!(presenter.error().is_none());
        assert_eq!(presenter.image(), "https://avatars.example/o");

        let changes = presenter.changes().expect("changes").collect().await;
        let messages: Vec<_> = changes.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "one", "zero"]);

        assert_eq!(changes[0].comments.count, 4);
        assert_eq!(
            changes[0].comments.url,
            "https://github.com/o/r/commit/c2#comments"
        );
        assert_eq!(changes[1].comments.count, 0);
        assert_eq!(changes[1].comments.url, "");
    }

    #[tokio::test]
    async fn test_changes_restart_on_each_call() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{API}/repos/o/r/compare/aaa...bbb"),
            ok(&comparison(&[commit("c0", "zero", 0)])),
        );
        mock.push_response(format!("{API}/users/o"), ok(r#"{"login":"o"}"#));

        let presenter = provider(&mock)
            .present(&descriptor("github.com/o/r", ""))
            .await
            .expect("recognized");

        assert_eq!(presenter.changes().expect("changes").collect().await.len(), 1);
        assert_eq!(presenter.changes().expect("changes").collect().await.len(), 1);
    }

    #[tokio::test]
    async fn test_compare_error_wins_over_avatar_error() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{API}/repos/o/r/compare/aaa...bbb"),
            status(404, &[], r#"{"message":"Not Found"}"#),
        );
        mock.push_response(
            format!("{API}/users/o"),
            status(500, &[], r#"{"message":"Server Error"}"#),
        );

        let presenter = provider(&mock)
            .present(&descriptor("github.com/o/r", ""))
            .await
            .expect("recognized");

        assert!(presenter.changes().is_none());
        assert_eq!(presenter.image(), FALLBACK_IMAGE);
        assert_eq!(
            presenter.error().map(ToString::to_string).as_deref(),
            Some("compare_commits: API error (404): Not Found")
        );
    }

    #[tokio::test]
    async fn test_avatar_error_alone_keeps_changes() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{API}/repos/o/r/compare/aaa...bbb"),
            ok(&comparison(&[commit("c0", "zero", 0)])),
        );
        mock.push_response(
            format!("{API}/users/o"),
            status(502, &[], "Bad Gateway"),
        );

        let presenter = provider(&mock)
            .present(&descriptor("github.com/o/r", ""))
            .await
            .expect("recognized");

        assert!(presenter.changes().is_some());
        assert_eq!(presenter.image(), FALLBACK_IMAGE);
        assert!(
            presenter
                .error()
                .is_some_and(|e| e.to_string().starts_with("get_user:"))
        );
    }

    #[tokio::test]
    async fn test_rate_limit_is_reported_with_reset_time() {
        let reset = chrono::Utc::now().timestamp() + 125;
        let reset = reset.to_string();
        let mock = MockTransport::new();
        mock.push_response(
            format!("{API}/repos/o/r/compare/aaa...bbb"),
            status(
                403,
                &[("x-ratelimit-remaining", "0"), ("x-ratelimit-reset", reset.as_str())],
                r#"{"message":"API rate limit exceeded"}"#,
            ),
        );
        mock.push_response(format!("{API}/users/o"), ok(r#"{"login":"o"}"#));

        let presenter = provider(&mock)
            .present(&descriptor("github.com/o/r", ""))
            .await
            .expect("recognized");

        let err = presenter.error().expect("error");
        assert!(err.is_rate_limited());
        assert!(
            err.to_string()
                .starts_with("GitHub API rate limit exceeded; it will be reset in 2m"),
            "unexpected message: {err}"
        );
    }

    #[tokio::test]
    async fn test_missing_commit_list_means_no_changes_and_no_error() {
        let mock = MockTransport::new();
        mock.push_response(format!("{API}/repos/o/r/compare/aaa...bbb"), ok("{}"));
        mock.push_response(format!("{API}/users/o"), ok(r#"{"login":"o"}"#));

        let presenter = provider(&mock)
            .present(&descriptor("github.com/o/r", ""))
            .await
            .expect("recognized");

        assert!(presenter.changes().is_none());
        assert!(presenter.error().is_none());
        assert_eq!(presenter.image(), FALLBACK_IMAGE);
    }

    #[tokio::test]
    async fn test_home_for_direct_and_mirrored_roots() {
        let mock = MockTransport::new();
        mock.push_response(format!("{API}/repos/gopherjs/gopherjs/compare/aaa...bbb"), ok("{}"));
        mock.push_response(format!("{API}/users/gopherjs"), ok(r#"{"login":"gopherjs"}"#));
        mock.push_response(format!("{API}/repos/golang/image/compare/aaa...bbb"), ok("{}"));
        mock.push_response(format!("{API}/users/golang"), ok(r#"{"login":"golang"}"#));

        let p = provider(&mock);

        let direct = p
            .present(&descriptor("github.com/gopherjs/gopherjs", ""))
            .await
            .expect("recognized");
        assert_eq!(
            direct.home().as_deref(),
            Some("https://github.com/gopherjs/gopherjs")
        );

        let mirrored = p
            .present(&descriptor(
                "golang.org/x/image",
                "https://go.googlesource.com/image",
            ))
            .await
            .expect("recognized");
        assert_eq!(mirrored.home().as_deref(), Some("http://golang.org/x/image"));
    }

    #[tokio::test]
    async fn test_unrecognized_and_malformed_make_no_requests() {
        let mock = MockTransport::new();
        let p = provider(&mock);

        assert!(p.present(&descriptor("example.org/pkg", "")).await.is_none());
        assert!(
            p.present(&descriptor("github.com/a/b/c", ""))
                .await
                .is_none()
        );
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_newest_first_on_empty_list() {
        assert!(newest_first(&[]).is_empty());
    }
}
