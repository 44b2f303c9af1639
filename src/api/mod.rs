//! Book club API
//!
//! Typed operations over the remote endpoints:
//!
//! - `GET /bookclub/` - paginated recommendations, optionally filtered
//! - `GET /bookclub/<id>/` - one recommendation
//! - `GET /bookclub/search/?q=` - server-side search (unpaginated)
//! - `GET /integrations/` - paginated recommendation sources

mod client;
mod query;

pub use client::{BookClubClient, BOOKS_PATH, INTEGRATIONS_PATH, SEARCH_PATH};
pub use query::BookQuery;
