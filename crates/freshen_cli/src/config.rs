//! Configuration file support for freshen.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `FRESHEN_`, e.g., `FRESHEN_GITHUB_TOKEN`)
//! 3. Config file (./freshen.toml, then ~/.config/freshen/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."                       # or use FRESHEN_GITHUB_TOKEN env var
//! api_url = "https://api.github.com"      # GitHub Enterprise: https://host/api/v3
//! timeout_secs = 30
//!
//! [output]
//! format = "text"                         # or "json"
//! ```

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config as ConfigBuilder, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::render::OutputFormat;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubSettings,
    /// Output configuration.
    pub output: OutputSettings,
}

/// GitHub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// GitHub API token.
    /// Can also be set via FRESHEN_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
    /// API base URL.
    /// Can also be set via FRESHEN_GITHUB_API_URL environment variable.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/freshen/config.toml)
    /// 3. Local config file (./freshen.toml)
    /// 4. Environment variables with FRESHEN_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("freshen.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./freshen.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // FRESHEN_GITHUB_TOKEN -> github.token
        builder = builder.add_source(
            Environment::with_prefix("FRESHEN")
                .separator("_")
                .try_parsing(true),
        );

        let built = Self::with_underscored_env_keys(builder).and_then(|b| b.build());
        match built {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Keys whose names contain `_` cannot be reached through the `_`
    /// separator, so map their variables explicitly.
    fn with_underscored_env_keys(
        builder: config::ConfigBuilder<DefaultState>,
    ) -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_override_option("github.api_url", std::env::var("FRESHEN_GITHUB_API_URL").ok())?
            .set_override_option(
                "github.timeout_secs",
                std::env::var("FRESHEN_GITHUB_TIMEOUT_SECS").ok(),
            )
    }

    /// Client settings for the GitHub provider.
    #[cfg(feature = "github")]
    pub fn github_config(&self) -> freshen::github::GitHubConfig {
        let mut config = freshen::github::GitHubConfig::default()
            .with_api_url(self.github.api_url.clone())
            .with_timeout(std::time::Duration::from_secs(self.github.timeout_secs.max(1)));
        if let Some(token) = &self.github.token {
            config = config.with_token(token.clone());
        }
        config
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "freshen").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml_content: &str) -> Config {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        settings.try_deserialize().unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_builder_with_defaults() {
        let settings = ConfigBuilder::builder().build().unwrap();
        let config: Config = settings.try_deserialize().unwrap_or_default();
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_full_config_parsing() {
        let config = from_toml(
            r#"
            [github]
            token = "ghp_test123"
            api_url = "https://ghe.example.com/api/v3"
            timeout_secs = 5

            [output]
            format = "json"
        "#,
        );

        assert_eq!(config.github.token, Some("ghp_test123".to_string()));
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.timeout_secs, 5);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_builder_partial_override() {
        let config = from_toml(
            r#"
            [github]
            timeout_secs = 90
        "#,
        );
        assert_eq!(config.github.timeout_secs, 90);
        // Other values should be defaults
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_override_option_reaches_underscored_key() {
        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(
                "[github]\napi_url = \"https://file.example\"",
                FileFormat::Toml,
            ))
            .set_override_option("github.api_url", Some("https://env.example"))
            .unwrap()
            .set_override_option("github.timeout_secs", None::<String>)
            .unwrap()
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.github.api_url, "https://env.example");
        assert_eq!(config.github.timeout_secs, 30);
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_github_config_carries_settings() {
        let config = from_toml(
            r#"
            [github]
            token = "ghp_test123"
            api_url = "https://ghe.example.com/api/v3"
            timeout_secs = 0
        "#,
        );
        let github = config.github_config();
        assert_eq!(github.token.as_deref(), Some("ghp_test123"));
        assert_eq!(github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(github.timeout, std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_default_config_path_names_freshen() {
        if let Some(path) = Config::default_config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.to_string_lossy().contains("freshen"));
        }
    }
}
