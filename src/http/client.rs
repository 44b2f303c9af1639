//! HTTP client bound to one API base URL
//!
//! Handles:
//! - Resolving page locators (paths or absolute URLs) against the base URL
//! - Optional rate limiting
//! - Classifying failures as network or decode errors
//!
//! Failures are returned as-is; nothing is retried.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::pagination::PageSource;
use crate::types::Page;
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// How absolute `next` URLs reported by the server are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorPolicy {
    /// Keep only path and query, and send them to the configured base URL
    #[default]
    Rebase,
    /// Use absolute URLs exactly as the server reported them
    Follow,
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: BTreeMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Treatment of absolute locators
    pub locator_policy: LocatorPolicy,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers,
            user_agent: format!("bookclub-hub/{}", env!("CARGO_PKG_VERSION")),
            locator_policy: LocatorPolicy::Rebase,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set how absolute locators are treated
    pub fn locator_policy(mut self, policy: LocatorPolicy) -> Self {
        self.config.locator_policy = policy;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client for JSON APIs
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base: Option<Url>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let base = config.base_url.as_deref().map(parse_base_url).transpose()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            base,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Resolve a locator to a full URL
    ///
    /// Relative locators are appended to the base URL. Absolute locators
    /// are reduced to path and query and appended the same way, unless the
    /// policy is [`LocatorPolicy::Follow`] or there is no base URL.
    pub fn resolve(&self, locator: &str) -> Result<Url> {
        let locator = locator.trim();

        match Url::parse(locator) {
            Ok(absolute) => match (&self.base, self.config.locator_policy) {
                (Some(base), LocatorPolicy::Rebase) => {
                    let relative = match absolute.query() {
                        Some(query) => format!("{}?{}", absolute.path(), query),
                        None => absolute.path().to_string(),
                    };
                    let rebased = join_base(base, &relative)?;
                    if rebased != absolute {
                        debug!("Rebased {} onto {}", absolute, rebased);
                    }
                    Ok(rebased)
                }
                _ => Ok(absolute),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base.as_ref().ok_or_else(|| {
                    Error::config(format!(
                        "Relative locator '{locator}' requires a base URL"
                    ))
                })?;
                join_base(base, locator)
            }
            Err(e) => Err(Error::InvalidUrl(e)),
        }
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, locator: &str) -> Result<T> {
        let url = self.resolve(locator)?;
        self.request_json(Method::GET, url, &[]).await
    }

    /// Make a GET request with query parameters and parse the JSON response
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        locator: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.resolve(locator)?;
        self.request_json(Method::GET, url, query).await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        query: &[(String, String)],
    ) -> Result<T> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), url.clone());
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !query.is_empty() {
            req = req.query(query);
        }

        debug!("{} {}", method, url);

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED {
                warn!("Unauthorized access to {}", final_url);
            }
            return Err(Error::http_status(status.as_u16(), final_url, body));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&body).map_err(|e| Error::decode(final_url, e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            return Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            };
        }
        Error::Http(err)
    }
}

#[async_trait]
impl PageSource for HttpClient {
    fn resolve_locator(&self, locator: &str) -> Result<String> {
        self.resolve(locator).map(String::from)
    }

    async fn fetch_page<T>(&self, url: &str) -> Result<Page<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.get_json(url).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Append a path (with optional query) to the base URL, keeping its path prefix
fn join_base(base: &Url, locator: &str) -> Result<Url> {
    let base = base.as_str().trim_end_matches('/');
    let path = locator.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// Parse and validate a base URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::invalid_value(
            "base_url",
            format!("unsupported scheme '{other}'"),
        )),
    }
}
