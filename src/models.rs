// Core data structures for the wikisage crawler and query engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::word_count;

/// A scraped wiki page
///
/// Immutable once created. Identity is the revision id in systematic crawls
/// and the resolved URL in random-discovery crawls. `word_count` is always
/// derived from `content` at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Page {
    /// Revision id, present for pages fetched by oldid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldid: Option<u64>,

    pub title: String,

    /// Resolved URL after redirects
    pub url: String,

    /// Plain-text page content with noise elements stripped
    pub content: String,

    /// Category names in first-seen order, no duplicates
    #[serde(default)]
    pub categories: Vec<String>,

    pub word_count: usize,

    pub scraped_at: DateTime<Utc>,
}

impl Page {
    /// Create a page, deriving `word_count` and stamping `scraped_at`
    pub fn new(
        oldid: Option<u64>,
        title: String,
        url: String,
        content: String,
        categories: Vec<String>,
    ) -> Self {
        let word_count = word_count(&content);
        Self {
            oldid,
            title,
            url,
            content,
            categories,
            word_count,
            scraped_at: Utc::now(),
        }
    }
}

/// A keyword term with its importance weight
///
/// Terms are lowercased and longer than one character; weights lie in
/// `[1.0, 10.0]`. A query produces an ordered sequence of these, sorted by
/// descending weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    pub term: String,
    pub weight: f64,
}

impl WeightedKeyword {
    pub fn new(term: impl Into<String>, weight: f64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// A scored page produced by ranking; ephemeral, never persisted
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub page: &'a Page,
    pub score: f64,
}

/// Counters accumulated over one crawl run
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlStats {
    /// Pages accepted into the corpus
    pub accepted: usize,

    /// Fetches that resolved to an already-seen URL
    pub duplicates: usize,

    /// Fetches that failed outright
    pub failed: usize,
}

impl CrawlStats {
    /// Total fetch attempts accounted for
    pub fn attempts(&self) -> usize {
        self.accepted + self.duplicates + self.failed
    }
}

/// How a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Reached the end of the range / the target page count
    Completed,
    /// Stopped by a cancellation signal; state was persisted
    Interrupted,
}
