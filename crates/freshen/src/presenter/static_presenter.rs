use std::sync::Arc;

use crate::descriptor::RepositoryDescriptor;

use super::changes::ChangeStream;
use super::errors::PresenterError;
use super::types::{Change, Presenter};

/// A presenter whose data is fixed up front.
///
/// Used for offline demos and as a test double for the pipeline.
#[derive(Debug, Clone)]
pub struct StaticPresenter {
    repo: Arc<RepositoryDescriptor>,
    home: Option<String>,
    image: String,
    changes: Option<Vec<Change>>,
    error: Option<PresenterError>,
}

impl StaticPresenter {
    pub fn new(repo: Arc<RepositoryDescriptor>, image: impl Into<String>) -> Self {
        Self {
            repo,
            home: None,
            image: image.into(),
            changes: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    #[must_use]
    pub fn with_changes(mut self, changes: Vec<Change>) -> Self {
        self.changes = Some(changes);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: PresenterError) -> Self {
        self.error = Some(error);
        self
    }
}

impl Presenter for StaticPresenter {
    fn repo(&self) -> &RepositoryDescriptor {
        &self.repo
    }

    fn home(&self) -> Option<String> {
        self.home.clone()
    }

    fn image(&self) -> String {
        self.image.clone()
    }

    fn changes(&self) -> Option<ChangeStream> {
        self.changes.clone().map(ChangeStream::spawn)
    }

    fn error(&self) -> Option<&PresenterError> {
        self.error.as_ref()
    }
}
