//! HTTP client module
//!
//! Provides a JSON HTTP client bound to the API base URL.
//!
//! # Features
//!
//! - **Locator Resolution**: Paths and absolute `next` URLs resolved against the base URL
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Error Classification**: Transport, status and decode failures kept apart

mod client;
mod rate_limit;

pub use client::{parse_base_url, HttpClient, HttpClientConfig, HttpClientConfigBuilder, LocatorPolicy};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
