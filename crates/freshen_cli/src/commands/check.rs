use std::path::Path;
use std::sync::Arc;

use freshen::ProviderRegistry;

use super::shared::render_presentations;
use crate::config::Config;
use crate::manifest::load_manifest;
use crate::progress::LoggingReporter;
use crate::render::OutputFormat;

/// Explain pending upstream changes for every outdated repository in
/// `manifest`.
pub(crate) async fn handle_check(
    manifest: &Path,
    format: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let descriptors = load_manifest(manifest)?;
    if descriptors.is_empty() {
        tracing::info!("Nothing to check; every repository is up to date");
        return Ok(());
    }

    let registry = Arc::new(build_registry(config)?);
    tracing::info!(
        repositories = descriptors.len(),
        providers = ?registry.provider_names(),
        "Checking repositories"
    );

    let reporter = Arc::new(LoggingReporter::new());
    let presentations = freshen::run(registry, descriptors, Some(reporter.as_callback()));
    let rendered = render_presentations(presentations, format).await?;

    if reporter.failed() > 0 {
        return Err(format!(
            "{} of {} repositories could not be presented",
            reporter.failed(),
            rendered + reporter.failed()
        )
        .into());
    }

    Ok(())
}

#[cfg(feature = "github")]
fn build_registry(config: &Config) -> Result<ProviderRegistry, Box<dyn std::error::Error>> {
    Ok(ProviderRegistry::with_defaults(&config.github_config())?)
}

#[cfg(not(feature = "github"))]
fn build_registry(_config: &Config) -> Result<ProviderRegistry, Box<dyn std::error::Error>> {
    tracing::warn!("Built without providers; every repository will be unmatched");
    Ok(ProviderRegistry::new())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[cfg(feature = "github")]
    #[test]
    fn test_default_registry_has_github() {
        let registry = build_registry(&Config::default()).expect("registry");
        assert_eq!(registry.provider_names(), vec!["github"]);
    }

    #[tokio::test]
    async fn test_up_to_date_manifest_does_no_work() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(
            br#"
            [[repo]]
            root = "github.com/a/b"
            local_revision = "same"
            remote_revision = "same"
        "#,
        )
        .expect("write");

        handle_check(file.path(), OutputFormat::Json, &Config::default())
            .await
            .expect("nothing to do");
    }
}
