//! Follows `next` links until the collection is exhausted
//!
//! Pages are requested one at a time, in server order. Items are appended
//! exactly as received. Any failure aborts the whole walk and the partial
//! accumulator is dropped.

use super::types::{FetchConfig, NextPage, PageSource, PaginationState};
use crate::error::{Error, Result};
use crate::types::{Collection, Page};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, info, warn};

/// Fetches every page of a collection and concatenates the items
#[derive(Debug)]
pub struct PaginatedFetcher<'a, S> {
    source: &'a S,
    config: FetchConfig,
}

impl<'a, S: PageSource> PaginatedFetcher<'a, S> {
    /// Create a fetcher with default settings
    pub fn new(source: &'a S) -> Self {
        Self::with_config(source, FetchConfig::default())
    }

    /// Create a fetcher with custom settings
    pub fn with_config(source: &'a S, config: FetchConfig) -> Self {
        Self { source, config }
    }

    /// Fetch all items reachable from `start`
    pub async fn fetch_all<T>(&self, start: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.fetch_all_pages(start).await.map(|c| c.results)
    }

    /// Fetch all items plus the server-reported count and page total
    pub async fn fetch_all_pages<T>(&self, start: &str) -> Result<Collection<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut state = PaginationState::new();
        self.run(start, &mut state).await
    }

    /// Like [`fetch_all_pages`](Self::fetch_all_pages), but gives up when
    /// `cancel` completes first
    ///
    /// The in-flight request is dropped and [`Error::Cancelled`] returned.
    pub async fn fetch_all_until<T, F>(&self, start: &str, cancel: F) -> Result<Collection<T>>
    where
        T: DeserializeOwned + Send,
        F: Future<Output = ()>,
    {
        let mut state = PaginationState::new();

        let outcome = {
            let run = self.run(start, &mut state);
            tokio::select! {
                result = run => Some(result),
                () = cancel => None,
            }
        };

        outcome.unwrap_or_else(|| {
            warn!("Fetch of {} cancelled after {} page(s)", start, state.pages);
            Err(Error::Cancelled {
                pages_fetched: state.pages,
            })
        })
    }

    async fn run<T>(&self, start: &str, state: &mut PaginationState) -> Result<Collection<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut results = Vec::new();
        let mut next = NextPage::Continue {
            locator: start.to_string(),
        };

        while let NextPage::Continue { locator } = next {
            if state.pages >= self.config.max_pages {
                return Err(Error::PageLimitExceeded {
                    max_pages: self.config.max_pages,
                });
            }

            let url = self.source.resolve_locator(&locator)?;
            if !state.visit(&url) {
                return Err(Error::PaginationCycle { url });
            }

            let page: Page<T> = self.source.fetch_page(&url).await?;
            state.record_page(page.results.len(), page.count);
            debug!(
                "Page {} from {}: {} item(s), {} of {} so far",
                state.pages,
                url,
                page.results.len(),
                state.total_fetched,
                page.count
            );

            next = NextPage::from_page(&page);
            results.extend(page.results);
        }

        info!(
            "Fetched {} item(s) in {} page(s) from {}",
            results.len(),
            state.pages,
            start
        );

        Ok(Collection {
            count: state.reported_count,
            pages: state.pages,
            results,
        })
    }
}
