//! HTTP page fetcher with admission gating and rate limiting
//!
//! One fetch = one bounded GET plus extraction. Every request first waits on
//! the rate limiter, then acquires a permit from the shared semaphore; the
//! permit is held for the duration of the network call only and released on
//! all exit paths. Failures map to [`FetchError`] so a failing fetch never
//! aborts the batch it belongs to.

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::Client;
use std::num::NonZeroU32;
use tokio::sync::Semaphore;

use crate::config::CrawlerConfig;
use crate::error::FetchError;
use crate::models::Page;
use crate::parser::WikiParser;

/// Fetches and extracts single wiki pages
pub struct PageFetcher {
    /// HTTP client with configured timeout and identity
    client: Client,

    /// Admission gate bounding concurrent in-flight fetches
    semaphore: Semaphore,

    /// Rate limiter applied before every request
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,

    parser: WikiParser,

    base_url: String,
}

impl PageFetcher {
    /// Create a fetcher from crawler configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;

        let rate = NonZeroU32::new(config.rate_limit).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            client,
            semaphore: Semaphore::new(config.max_concurrent),
            rate_limiter,
            parser: WikiParser::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a specific revision by oldid
    pub async fn fetch_oldid(&self, oldid: u64) -> Result<Page, FetchError> {
        let url = format!("{}/index.php?oldid={oldid}", self.base_url);
        self.fetch_page(&url, Some(oldid)).await
    }

    /// Fetch a random page via the Special:Random redirect
    ///
    /// The returned page's URL is the resolved target after redirects, which
    /// is what discovery-mode deduplication keys on.
    pub async fn fetch_random(&self) -> Result<Page, FetchError> {
        let url = format!("{}/index.php?title=Special:Random", self.base_url);
        self.fetch_page(&url, None).await
    }

    async fn fetch_page(&self, url: &str, oldid: Option<u64>) -> Result<Page, FetchError> {
        self.rate_limiter.until_ready().await;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FetchError::GateClosed)?;

        tracing::debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let html = response.text().await.map_err(map_reqwest_error)?;

        let page = self.parser.extract(&html, &final_url, oldid)?;
        tracing::debug!(
            url = %final_url,
            title = %page.title,
            words = page.word_count,
            "Extracted page"
        );
        Ok(page)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err)
    }
}
