//! Pagination types and traits
//!
//! Defines the transport seam the fetcher walks and the state it tracks.

use crate::error::Result;
use crate::types::Page;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

/// Default ceiling on pages fetched by one invocation
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Something that can fetch one page of a collection
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Turn a locator into the canonical URL it will be fetched from
    ///
    /// Two locators that resolve to the same string are the same page.
    fn resolve_locator(&self, locator: &str) -> Result<String>;

    /// Fetch and decode the page at an already resolved URL
    async fn fetch_page<T>(&self, url: &str) -> Result<Page<T>>
    where
        T: DeserializeOwned + Send;
}

/// What to do after a page has been consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this locator next
    Continue {
        /// Locator exactly as the server reported it
        locator: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Decide from a page's `next` field
    pub fn from_page<T>(page: &Page<T>) -> Self {
        match page.next_locator() {
            Some(locator) => Self::Continue {
                locator: locator.to_string(),
            },
            None => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Settings for one fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Maximum number of pages before giving up
    pub max_pages: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Tracks pagination state during one fetch-all invocation
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: usize,
    /// Items accumulated so far
    pub total_fetched: u64,
    /// `count` reported by the most recent page
    pub reported_count: u64,
    /// Resolved URLs already requested
    pub visited: HashSet<String>,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a URL as visited; returns false if it was seen before
    pub fn visit(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Account for a fetched page
    pub fn record_page(&mut self, items: usize, reported_count: u64) {
        self.pages += 1;
        self.total_fetched += items as u64;
        self.reported_count = reported_count;
    }
}
