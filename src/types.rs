//! Common types used throughout the book club client
//!
//! Wire shapes for the collection endpoints and the records they carry.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Page
// ============================================================================

/// One page of a paginated collection
///
/// The server reports the total `count` on every page; only `results` and
/// `next` drive pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    #[serde(default)]
    pub count: u64,
    /// Locator of the following page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// Locator of the preceding page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page, in server order
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// The next page locator, treating an empty string as absent
    pub fn next_locator(&self) -> Option<&str> {
        self.next.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next_locator().is_none()
    }
}

// ============================================================================
// Book
// ============================================================================

/// Date format used by the API for publication dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A book recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Canonical URL of the recommendation (primary key)
    pub url: String,
    /// Identifier, when the API provides one separately from `url`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Book title
    pub book: String,
    /// Author name
    pub author: String,
    /// Publication date as sent by the server (`YYYY-MM-DD`)
    pub date: String,
    /// Numeric id of the source integration
    #[serde(default, alias = "integration_id")]
    pub integration: Option<i64>,
    /// Human-readable source label
    #[serde(default)]
    pub integration_name: String,
}

impl Book {
    /// Parse the publication date
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }
}

// ============================================================================
// Integration
// ============================================================================

/// A recommendation source (newsletter, podcast, site...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Identifier; numeric ids are normalized to strings
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name, matching `Book::integration_name`
    pub name: String,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

// ============================================================================
// Collection summary
// ============================================================================

/// Every item of a collection plus what the server reported about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection<T> {
    /// `count` as reported by the last page fetched
    pub count: u64,
    /// Number of pages fetched
    pub pages: usize,
    /// All items, in page order
    pub results: Vec<T>,
}

impl<T> Collection<T> {
    /// Number of items
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no items were fetched
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
