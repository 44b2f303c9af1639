//! Client configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML file,
//! then environment variables, then command-line flags.
//!
//! ```yaml
//! api:
//!   base_url: https://the-green-papaya-api.fly.dev
//!   timeout_secs: 30
//!   max_pages: 10000
//!   rate_limit_per_second: 5
//!   locator_policy: rebase
//! ```

use crate::error::{Error, Result};
use crate::http::{parse_base_url, HttpClientConfig, LocatorPolicy, RateLimiterConfig};
use crate::pagination::{FetchConfig, DEFAULT_MAX_PAGES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Public deployment of the book club API
pub const DEFAULT_BASE_URL: &str = "https://the-green-papaya-api.fly.dev";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "BOOKCLUB_API_URL";

/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_SECS: &str = "BOOKCLUB_TIMEOUT_SECS";

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Where and how to reach the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ceiling on pages fetched by one fetch-all
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Requests per second; unset disables rate limiting
    #[serde(default)]
    pub rate_limit_per_second: Option<u32>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub locator_policy: LocatorPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_pages: default_max_pages(),
            rate_limit_per_second: None,
            user_agent: None,
            locator_policy: LocatorPolicy::default(),
        }
    }
}

impl Config {
    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string
    ///
    /// Values are not validated here; call [`validate`](Self::validate)
    /// once environment and flag overrides have been applied.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|s| !s.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse().ok()) {
            self.api.timeout_secs = secs;
        }
        self
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
        }
        self
    }

    /// Check that values are usable
    pub fn validate(&self) -> Result<()> {
        parse_base_url(&self.api.base_url).map_err(|e| match e {
            Error::InvalidUrl(inner) => Error::invalid_value("base_url", inner.to_string()),
            other => other,
        })?;
        if self.api.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if self.api.max_pages == 0 {
            return Err(Error::invalid_value("max_pages", "must be positive"));
        }
        Ok(())
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.api.base_url.clone())
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .locator_policy(self.api.locator_policy);

        if let Some(rps) = self.api.rate_limit_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        if let Some(ref agent) = self.api.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }

    /// Pagination settings derived from this config
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            max_pages: self.api.max_pages,
        }
    }
}
