//! Settings file and defaults
//!
//! Precedence is CLI flag, then the TOML settings file, then built-in
//! defaults. Every key is optional:
//!
//! ```toml
//! cache_ttl_secs = 3600
//! max_concurrency = 8
//! max_retries = 6
//! retry_base_delay_ms = 1000
//! request_timeout_secs = 30
//! dependency_file_url_template = "https://raw.githubusercontent.com/{owner}/{name}/HEAD/{path}"
//! ```

use crate::cli::CliArgs;
use crate::error::{ConfigError, RegistryError};
use crate::registry::HttpClient;
use crate::resolver::{ResolverConfig, DEFAULT_CONCURRENCY, DEFAULT_FILE_URL_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Cache entry lifetime in seconds
    pub cache_ttl_secs: u64,
    /// Maximum concurrent upstream requests
    pub max_concurrency: usize,
    /// Maximum retries for transient failures
    pub max_retries: u32,
    /// Base delay for exponential backoff in milliseconds
    pub retry_base_delay_ms: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Where fallback build files are fetched from
    pub dependency_file_url_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: crate::cache::DEFAULT_TTL.as_secs(),
            max_concurrency: DEFAULT_CONCURRENCY,
            max_retries: crate::registry::MAX_RETRIES,
            retry_base_delay_ms: crate::registry::BASE_DELAY.as_millis() as u64,
            request_timeout_secs: crate::registry::DEFAULT_TIMEOUT.as_secs(),
            dependency_file_url_template: DEFAULT_FILE_URL_TEMPLATE.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::from_toml(path, &content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))
    }

    /// Build settings for a CLI invocation: file (if any), then flags
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_cli(args);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply CLI overrides
    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(ttl) = args.cache_ttl {
            self.cache_ttl_secs = ttl;
        }
        if let Some(concurrency) = args.max_concurrency {
            self.max_concurrency = concurrency;
        }
        if let Some(retries) = args.max_retries {
            self.max_retries = retries;
        }
    }

    /// Reject values the resolver cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::invalid_value(
                "max_concurrency",
                "must be at least 1",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "request_timeout_secs",
                "must be at least 1",
            ));
        }
        if !self.dependency_file_url_template.contains("{path}") {
            return Err(ConfigError::invalid_value(
                "dependency_file_url_template",
                "must contain the {path} placeholder",
            ));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP client configured with these timeouts and retry limits
    pub fn http_client(&self) -> Result<HttpClient, RegistryError> {
        Ok(HttpClient::with_timeout(self.request_timeout())?
            .with_max_retries(self.max_retries)
            .with_base_delay(self.retry_base_delay()))
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            max_concurrency: self.max_concurrency,
            dependency_file_url_template: self.dependency_file_url_template.clone(),
        }
    }
}
