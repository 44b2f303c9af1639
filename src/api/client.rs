//! Book club API client

use super::query::BookQuery;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{FetchConfig, PaginatedFetcher};
use crate::types::{Book, Collection, Integration, Page};
use std::future::Future;
use tracing::debug;
use url::Url;

/// Root of the book collection
pub const BOOKS_PATH: &str = "/bookclub/";

/// Server-side search endpoint
pub const SEARCH_PATH: &str = "/bookclub/search/";

/// Root of the integration collection
pub const INTEGRATIONS_PATH: &str = "/integrations/";

/// Client for the book club API
#[derive(Debug)]
pub struct BookClubClient {
    http: HttpClient,
    fetch: FetchConfig,
}

impl BookClubClient {
    /// Create a client over an HTTP client bound to the API base URL
    pub fn new(http: HttpClient) -> Self {
        Self::with_fetch_config(http, FetchConfig::default())
    }

    /// Create a client with custom pagination settings
    pub fn with_fetch_config(http: HttpClient, fetch: FetchConfig) -> Self {
        Self { http, fetch }
    }

    /// Get the underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn fetcher(&self) -> PaginatedFetcher<'_, HttpClient> {
        PaginatedFetcher::with_config(&self.http, self.fetch)
    }

    /// Fetch every book, following pagination
    pub async fn get_all_books(&self) -> Result<Collection<Book>> {
        self.fetcher().fetch_all_pages(BOOKS_PATH).await
    }

    /// Fetch every book, giving up when `cancel` completes first
    pub async fn get_all_books_until<F>(&self, cancel: F) -> Result<Collection<Book>>
    where
        F: Future<Output = ()>,
    {
        self.fetcher().fetch_all_until(BOOKS_PATH, cancel).await
    }

    /// Fetch a single page of books filtered server-side
    pub async fn get_books(&self, query: &BookQuery) -> Result<Page<Book>> {
        let pairs = query.to_pairs();
        debug!("Fetching one page of books with {:?}", pairs);
        self.http.get_json_with_query(BOOKS_PATH, &pairs).await
    }

    /// Fetch one book by id
    pub async fn get_book(&self, id: &str) -> Result<Book> {
        let url = self.book_url(id)?;
        self.http.get_json(url.as_str()).await
    }

    /// Detail URL for a book
    ///
    /// Ids are usually URLs themselves, so the id is percent-encoded as a
    /// single path segment.
    pub fn book_url(&self, id: &str) -> Result<Url> {
        let mut url = self.http.resolve(BOOKS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| Error::config("Base URL cannot carry a path"))?
            .pop_if_empty()
            .push(id)
            .push("");
        Ok(url)
    }

    /// Search books on the server
    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>> {
        self.http
            .get_json_with_query(SEARCH_PATH, &[("q".to_string(), query.to_string())])
            .await
    }

    /// Fetch every integration, following pagination
    pub async fn get_integrations(&self) -> Result<Vec<Integration>> {
        self.fetcher().fetch_all(INTEGRATIONS_PATH).await
    }
}
