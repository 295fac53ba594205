use std::sync::Arc;

use async_trait::async_trait;

use crate::descriptor::RepositoryDescriptor;

use super::types::Presenter;

/// Recognizes repository identities and builds presenters for them.
///
/// # Implementation Notes
///
/// Implementors should:
/// - Return `None` for identities they do not understand, including ones
///   whose prefix matches but whose shape is malformed
/// - Capture upstream failures inside the returned presenter rather than
///   failing the call
/// - Bind the returned presenter to `repo`
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Build a presenter for `repo`, or `None` if this provider does not
    /// recognize it. May perform network I/O before returning.
    async fn present(&self, repo: &Arc<RepositoryDescriptor>) -> Option<Box<dyn Presenter>>;
}

/// Ordered set of providers; the first one that recognizes a descriptor wins.
///
/// Built once at startup and then shared read-only (usually behind an
/// [`Arc`]) by every dispatch in a run.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider. Providers are consulted in registration order.
    pub fn register(&mut self, provider: impl Provider + 'static) -> &mut Self {
        tracing::debug!(provider = provider.name(), "Registering provider");
        self.providers.push(Box::new(provider));
        self
    }

    /// Ask each provider in turn for a presenter and return the first one.
    pub async fn dispatch(&self, repo: &Arc<RepositoryDescriptor>) -> Option<Box<dyn Presenter>> {
        for provider in &self.providers {
            if let Some(presenter) = provider.present(repo).await {
                tracing::debug!(root = %repo.root, provider = provider.name(), "Provider matched");
                return Some(presenter);
            }
        }
        tracing::debug!(root = %repo.root, "No provider matched");
        None
    }

    /// Names of the registered providers, in dispatch order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(feature = "github")]
impl ProviderRegistry {
    /// Build a registry holding every compiled-in provider.
    pub fn with_defaults(
        github: &crate::github::GitHubConfig,
    ) -> Result<Self, crate::github::GitHubError> {
        let mut registry = Self::new();
        crate::github::register(&mut registry, crate::github::GitHubClient::new(github)?);
        Ok(registry)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}
