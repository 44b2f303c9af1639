//! CLI module
//!
//! Command-line interface for browsing recommendations.
//!
//! # Commands
//!
//! - `books` - Fetch every recommendation and filter locally
//! - `page` - Fetch one server-filtered page
//! - `book` - Show one recommendation
//! - `search` - Server-side search
//! - `sources` - List recommendation sources

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render_books, summarize_sources, Runner};
