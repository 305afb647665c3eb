//! wikisage - resumable wiki crawler with keyword-weighted question answering
//!
//! Builds a local corpus from a MediaWiki-style site and answers questions
//! by ranking corpus pages against weighted keywords, handing the best
//! matches plus the question to an external text-generation endpoint.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Resumable concurrent crawling (systematic and discovery)
//! - [`parser`] - Wiki HTML page extraction
//! - [`models`] - Core data structures and types
//! - [`storage`] - Corpus persistence and atomic checkpoints
//! - [`query`] - Keyword extraction and relevance ranking
//! - [`llm`] - Text-generation client
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use wikisage::config::Config;
//! use wikisage::crawler::PageFetcher;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let fetcher = PageFetcher::new(&config.crawler)?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod crawler;
pub mod error;
pub mod llm;
pub mod models;
pub mod parser;
pub mod query;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{DiscoveryCrawler, PageFetcher, SystematicCrawler};
    pub use crate::error::{ExtractError, FetchError, LlmError};
    pub use crate::models::{CrawlOutcome, CrawlStats, MatchResult, Page, WeightedKeyword};
    pub use crate::query::{Assistant, RelevanceScorer};
    pub use crate::storage::{CheckpointStore, Corpus, PageStore};
}

// Direct re-exports for convenience
pub use models::{CrawlOutcome, CrawlStats, Page, WeightedKeyword};
