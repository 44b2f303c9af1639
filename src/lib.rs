//! # Book Club Hub
//!
//! Client for a REST API that serves book club recommendations.
//!
//! ## Features
//!
//! - **Full Collection Fetch**: Follows `next` links until the collection is exhausted
//! - **Loop Guards**: Refuses to revisit a page and stops at a page ceiling
//! - **Cancellation**: Abandon a fetch-all without a partial result
//! - **Client-side Filtering**: Search, source and date window over fetched books
//! - **Layered Config**: Defaults, YAML file, environment, flags
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookclub_hub::{api::BookClubClient, config::Config, http::HttpClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::default().with_env();
//!     let client = BookClubClient::new(HttpClient::with_config(config.http_config())?);
//!
//!     let books = client.get_all_books().await?;
//!     println!("{} books", books.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    CLI (clap)                        │
//! └──────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────────┬───────────┴──────────┬────────────────┐
//! │   Config     │   BookClubClient     │    Filter      │
//! ├──────────────┼──────────────────────┼────────────────┤
//! │ YAML / env   │ books, search,       │ search         │
//! │ flags        │ integrations         │ source, date   │
//! └──────────────┴──────────┬───────────┴────────────────┘
//!                           │
//! ┌─────────────────────────┴────────────────────────────┐
//! │  PaginatedFetcher ──▶ PageSource ──▶ HttpClient      │
//! └──────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Wire types: pages, books, integrations
pub mod types;

/// HTTP client with optional rate limiting
pub mod http;

/// Fetching every page of a collection
pub mod pagination;

/// Book club API operations
pub mod api;

/// Client-side filtering
pub mod filter;

/// Layered configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use api::BookClubClient;
pub use pagination::{PageSource, PaginatedFetcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
