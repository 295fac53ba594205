//! Freshen - explains what changed upstream for outdated local checkouts.
//!
//! Given descriptors of repositories whose local revision lags the remote
//! one, this library picks a presenter for each (via a
//! [`ProviderRegistry`]), runs them concurrently, and streams the results
//! to a consumer as they complete.
//!
//! # Features
//!
//! - `github` - GitHub-backed provider (default).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use freshen::{ProviderRegistry, RepositoryDescriptor, github::GitHubConfig, workspace};
//!
//! let registry = Arc::new(ProviderRegistry::with_defaults(&GitHubConfig::default())?);
//! let mut presentations = workspace::run(registry, descriptors, None);
//!
//! while let Some(p) = presentations.next().await {
//!     println!("{}", p.root());
//! }
//! ```

pub mod descriptor;
pub mod http;
pub mod presenter;
pub mod workspace;

#[cfg(feature = "github")]
pub mod github;

pub use descriptor::RepositoryDescriptor;
pub use presenter::{
    Change, ChangeStream, Comments, Presenter, PresenterError, Provider, ProviderRegistry,
    RepoPresenter, StaticPresenter, short_error_message,
};
pub use workspace::{
    Presentations, ProgressCallback, RunProgress, Workspace, WorkspaceError, run, run_streaming,
};
