//! Client-side filtering of fetched books
//!
//! Filters run over an already assembled collection and never reorder it.

use crate::types::Book;
use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source value meaning "every source"
pub const ALL_SOURCES: &str = "all";

/// How far back a book's date may lie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateWindow {
    /// No date restriction
    #[default]
    All,
    /// Last 7 days
    Week,
    /// Last month
    Month,
    /// Last 3 months
    Quarter,
}

impl DateWindow {
    /// Label shown to users
    pub fn label(self) -> &'static str {
        match self {
            DateWindow::All => "All Time",
            DateWindow::Week => "Past Week",
            DateWindow::Month => "Past Month",
            DateWindow::Quarter => "Past Quarter",
        }
    }

    /// Earliest instant (exclusive) a book may be dated at, relative to `now`
    pub fn cutoff(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            DateWindow::All => None,
            DateWindow::Week => now.checked_sub_signed(Duration::weeks(1)),
            DateWindow::Month => now.checked_sub_months(Months::new(1)),
            DateWindow::Quarter => now.checked_sub_months(Months::new(3)),
        }
    }

    /// Check whether a book falls inside this window
    ///
    /// A book dated at midnight must be strictly after the cutoff. Books
    /// whose date cannot be parsed only pass [`DateWindow::All`].
    pub fn contains(self, book: &Book, now: NaiveDateTime) -> bool {
        let Some(cutoff) = self.cutoff(now) else {
            return true;
        };
        book.published_on()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .is_some_and(|published| published > cutoff)
    }
}

/// Combined search, source and date filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive substring of title or author
    pub search: Option<String>,
    /// Exact source label; `None` or `"all"` matches every source
    pub source: Option<String>,
    /// Recency window
    pub window: DateWindow,
}

impl BookFilter {
    /// Create a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Match title or author
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Match one source
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Restrict to a recency window
    #[must_use]
    pub fn window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Check a single book
    pub fn matches(&self, book: &Book, now: NaiveDateTime) -> bool {
        self.matches_search(book) && self.matches_source(book) && self.window.contains(book, now)
    }

    fn matches_search(&self, book: &Book) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                book.book.to_lowercase().contains(&term)
                    || book.author.to_lowercase().contains(&term)
            }
        }
    }

    fn matches_source(&self, book: &Book) -> bool {
        match self.source.as_deref() {
            None | Some(ALL_SOURCES) => true,
            Some(source) => book.integration_name == source,
        }
    }

    /// Keep matching books, preserving order
    pub fn apply<'a>(&self, books: &'a [Book], now: NaiveDateTime) -> Vec<&'a Book> {
        books.iter().filter(|b| self.matches(b, now)).collect()
    }
}

/// Distinct source labels in order of first appearance
pub fn sources(books: &[Book]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for book in books {
        if !seen.iter().any(|s| s == &book.integration_name) {
            seen.push(book.integration_name.clone());
        }
    }
    seen
}
