//! Pagination module
//!
//! Follows `next` links until null and reassembles the full collection.
//!
//! # Overview
//!
//! The server bounds each response to one page and reports the locator of
//! the following page. [`PaginatedFetcher`] walks those locators strictly
//! in order through a [`PageSource`], refusing to revisit a locator and
//! stopping at a configurable page ceiling.

mod fetcher;
mod types;

pub use fetcher::PaginatedFetcher;
pub use types::{FetchConfig, NextPage, PageSource, PaginationState, DEFAULT_MAX_PAGES};
