//! Server-side filters for a single page of books

use chrono::NaiveDate;

use crate::types::DATE_FORMAT;

/// Query parameters accepted by the book listing endpoint
///
/// Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    /// Free-text search term
    pub search: Option<String>,
    /// Source name
    pub integration: Option<String>,
    /// Earliest recommendation date
    pub start_date: Option<NaiveDate>,
    /// Latest recommendation date
    pub end_date: Option<NaiveDate>,
    /// Page size
    pub limit: Option<u32>,
    /// Index of the first item on the page
    pub offset: Option<u32>,
}

impl BookQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict to one source
    #[must_use]
    pub fn integration(mut self, name: impl Into<String>) -> Self {
        self.integration = Some(name.into());
        self
    }

    /// Set the date range
    #[must_use]
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page offset
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render as query pairs, in a stable order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };

        push("search", self.search.clone().filter(|s| !s.is_empty()));
        push("integration", self.integration.clone());
        push(
            "startDate",
            self.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
        );
        push(
            "endDate",
            self.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
        );
        push("limit", self.limit.map(|n| n.to_string()));
        push("offset", self.offset.map(|n| n.to_string()));

        pairs
    }
}
