//! GitHub-backed presenters.
//!
//! # Module Structure
//!
//! - [`identity`] - Mapping of repository identities onto GitHub repositories
//! - [`client`] - Read-only REST client over the HTTP transport
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Wire types for the compare and users endpoints
//! - `presenter` - The presenter and its provider
//!
//! ```ignore
//! use freshen::github::{self, GitHubClient, GitHubConfig};
//!
//! let mut registry = ProviderRegistry::new();
//! github::register(&mut registry, GitHubClient::new(&GitHubConfig::default())?);
//! ```

pub mod client;
pub mod error;
pub mod identity;
mod presenter;
pub mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, GitHubClient, GitHubConfig};
pub use error::{GitHubError, is_rate_limit_error};
pub use identity::{Convention, GitHubTarget, IdentityError};
pub use presenter::{FALLBACK_IMAGE, GitHubPresenter, GitHubProvider};

use crate::presenter::ProviderRegistry;

/// Register the GitHub provider.
pub fn register(registry: &mut ProviderRegistry, client: GitHubClient) {
    registry.register(GitHubProvider::new(client));
}
