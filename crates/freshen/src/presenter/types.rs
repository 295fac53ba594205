use std::sync::Arc;

use serde::Serialize;

use crate::descriptor::RepositoryDescriptor;

use super::changes::ChangeStream;
use super::errors::PresenterError;

/// Discussion attached to a change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comments {
    /// Number of comments; zero when there is no discussion.
    pub count: u32,
    /// Link to the discussion; empty when `count` is zero.
    pub url: String,
}

/// One normalized unit of upstream history, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    /// First paragraph of the commit message.
    pub message: String,
    /// Web link to the change.
    pub url: String,
    pub comments: Comments,
}

impl Change {
    /// Build a change from a raw commit message, its web URL and comment count.
    ///
    /// Only the first paragraph of `message` is kept. When `comment_count` is
    /// non-zero the discussion link is the change URL with a `#comments`
    /// fragment.
    pub fn new(message: impl AsRef<str>, url: impl Into<String>, comment_count: u32) -> Self {
        let url = url.into();
        let comments = if comment_count > 0 {
            Comments {
                count: comment_count,
                url: format!("{url}#comments"),
            }
        } else {
            Comments::default()
        };

        Self {
            message: first_paragraph(message.as_ref()).to_string(),
            url,
            comments,
        }
    }
}

/// Returns the first paragraph of a string.
pub fn first_paragraph(s: &str) -> &str {
    match s.find("\n\n") {
        Some(index) => &s[..index],
        None => s,
    }
}

/// Display data and pending history for one repository.
///
/// A presenter is bound to a single [`RepositoryDescriptor`] for its whole
/// lifetime. Everything except [`Presenter::changes`] is resolved by the time
/// the presenter is handed out, so the accessors never block.
pub trait Presenter: Send + Sync {
    /// The descriptor this presenter explains.
    fn repo(&self) -> &RepositoryDescriptor;

    /// Home page of the repository, if known.
    fn home(&self) -> Option<String>;

    /// Image representing the repository (typically the owner avatar).
    fn image(&self) -> String;

    /// Changes between the local and remote revisions.
    ///
    /// `None` when the history could not be fetched. Each call starts a new
    /// stream over the same fixed set of changes.
    fn changes(&self) -> Option<ChangeStream>;

    /// The error that stopped this presenter, if any.
    fn error(&self) -> Option<&PresenterError>;
}

/// A descriptor paired with the presenter selected for it.
///
/// `presenter` is `None` when no provider recognized the descriptor.
pub struct RepoPresenter {
    pub repo: Arc<RepositoryDescriptor>,
    pub presenter: Option<Box<dyn Presenter>>,
}

impl RepoPresenter {
    pub fn new(repo: Arc<RepositoryDescriptor>, presenter: Option<Box<dyn Presenter>>) -> Self {
        Self { repo, presenter }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        &self.repo.root
    }
}

impl std::fmt::Debug for RepoPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoPresenter")
            .field("root", &self.repo.root)
            .field("matched", &self.presenter.is_some())
            .field(
                "error",
                &self
                    .presenter
                    .as_ref()
                    .and_then(|p| p.error().map(ToString::to_string)),
            )
            .finish()
    }
}
