//! Error types for the book club client
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Failures fall into a small number of kinds (see [`ErrorKind`]); callers
//! that only care whether the network or the payload was at fault should
//! match on [`Error::kind`] rather than on individual variants.

use thiserror::Error;

/// The main error type for the book club client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Network Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Fetch cancelled after {pages_fetched} page(s)")]
    Cancelled { pages_fetched: usize },

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Pagination cycle: {url} was already fetched")]
    PaginationCycle { url: String },

    #[error("Pagination exceeded {max_pages} pages")]
    PageLimitExceeded { max_pages: usize },
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure: unreachable host, timeout, reset, bad status, cancellation
    Network,
    /// Response body did not match the expected shape
    Decode,
    /// The server's `next` links never terminated
    Pagination,
    /// Bad local configuration or input
    Config,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Timeout { .. }
            | Error::Cancelled { .. } => ErrorKind::Network,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::PaginationCycle { .. } | Error::PageLimitExceeded { .. } => {
                ErrorKind::Pagination
            }
            Error::Config { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::InvalidUrl(_) => ErrorKind::Config,
        }
    }

    /// Check if this is a transport-level failure
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// Check if the response body could not be decoded
    pub fn is_decode(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }
}

/// Result type alias for the book club client
pub type Result<T> = std::result::Result<T, Error>;
