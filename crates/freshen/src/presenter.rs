//! Presenter contract and provider dispatch.
//!
//! A [`Presenter`] explains the pending upstream changes of one repository: a
//! home link, an image, a stream of [`Change`]s and, when something went
//! wrong, a terminal [`PresenterError`]. Providers recognize repository
//! identities and build presenters; the [`ProviderRegistry`] asks them in
//! registration order.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use freshen::{ProviderRegistry, RepositoryDescriptor, github::GitHubConfig};
//!
//! let registry = ProviderRegistry::with_defaults(&GitHubConfig::default())?;
//! let repo = Arc::new(RepositoryDescriptor::new("github.com/gopherjs/gopherjs", "", local, remote));
//! if let Some(presenter) = registry.dispatch(&repo).await {
//!     println!("{:?}", presenter.home());
//! }
//! ```

mod changes;
mod errors;
mod registry;
mod static_presenter;
mod types;

pub use changes::{CHANGE_STREAM_BUFFER, ChangeStream};
pub use errors::{PresenterError, format_duration, reset_phrase, short_error_message};
pub use registry::{Provider, ProviderRegistry};
pub use static_presenter::StaticPresenter;
pub use types::{Change, Comments, Presenter, RepoPresenter, first_paragraph};
