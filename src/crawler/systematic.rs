//! Systematic oldid-range crawl
//!
//! A state machine over a monotonically increasing cursor. Each batch issues
//! one concurrent fetch per id up to the concurrency limit, awaits them all,
//! and advances the cursor over every id in the batch whether it succeeded
//! or not, so a permanently failing revision can never block resume. The
//! corpus is persisted every `checkpoint_every` accepted pages and once more,
//! unconditionally, when the run ends for any reason.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::CrawlerConfig;
use crate::crawler::PageFetcher;
use crate::models::{CrawlOutcome, CrawlStats};
use crate::storage::PageStore;

/// Result of a systematic crawl run
#[derive(Debug)]
pub struct CrawlReport {
    pub outcome: CrawlOutcome,
    pub stats: CrawlStats,

    /// Cursor position at exit; equals `end_oldid` on completion
    pub last_oldid: u64,

    /// Corpus size at exit
    pub total_pages: usize,
}

/// Drives the oldid-range crawl
pub struct SystematicCrawler {
    fetcher: PageFetcher,
    store: PageStore,
    config: CrawlerConfig,
    shutdown: Arc<AtomicBool>,
}

impl SystematicCrawler {
    pub fn new(
        fetcher: PageFetcher,
        store: PageStore,
        config: CrawlerConfig,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            fetcher,
            store,
            config,
            shutdown,
        }
    }

    /// Run the crawl to completion or interruption
    ///
    /// Resumes from the persisted cursor: ids at or below it are never
    /// re-fetched. Running twice after completion is a no-op.
    pub async fn run(&self) -> Result<CrawlReport> {
        let mut corpus = self.store.load();

        let end = self.config.end_oldid;
        let mut cursor = corpus
            .last_oldid
            .max(self.config.start_oldid.saturating_sub(1));
        corpus.last_oldid = cursor;

        tracing::info!(
            start = self.config.start_oldid,
            end,
            resume_from = cursor + 1,
            concurrency = self.config.max_concurrent,
            "Starting systematic crawl"
        );

        let mut stats = CrawlStats::default();
        let mut since_save = 0usize;
        let mut outcome = CrawlOutcome::Completed;
        let delay = self.config.batch_delay();

        while cursor < end {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!(last_oldid = cursor, "Crawl interrupted, stopping at batch boundary");
                outcome = CrawlOutcome::Interrupted;
                break;
            }

            let batch_start = cursor + 1;
            let batch_end = cursor
                .saturating_add(self.config.max_concurrent as u64)
                .min(end);
            let ids: Vec<u64> = (batch_start..=batch_end).collect();

            tracing::debug!(from = batch_start, to = batch_end, "Processing batch");

            let fetches = ids.iter().map(|&id| self.fetcher.fetch_oldid(id));
            let results = futures::future::join_all(fetches).await;

            for (&id, result) in ids.iter().zip(results) {
                match result {
                    Ok(page) => {
                        tracing::info!(oldid = id, title = %page.title, words = page.word_count, "Page scraped");
                        corpus.push(page);
                        stats.accepted += 1;
                        since_save += 1;
                    }
                    Err(e) => {
                        stats.failed += 1;
                        // Deleted revisions 404 forever; only transient
                        // failures are worth a warning.
                        if e.is_recoverable() {
                            tracing::warn!(oldid = id, error = %e, "Fetch failed");
                        } else {
                            tracing::debug!(oldid = id, error = %e, "Revision unavailable");
                        }
                    }
                }
                // The cursor advances over failures too; a dead id must not
                // re-block progress on resume.
                corpus.last_oldid = id;
            }
            cursor = batch_end;

            if since_save >= self.config.checkpoint_every {
                self.persist(&corpus);
                since_save = 0;
            }

            let span = end.saturating_sub(self.config.start_oldid) + 1;
            let done = cursor.saturating_sub(self.config.start_oldid) + 1;
            tracing::info!(
                progress = %format!("{:.1}%", done as f64 / span as f64 * 100.0),
                pages = corpus.total_pages,
                "Batch complete"
            );

            if cursor < end {
                tokio::time::sleep(delay).await;
            }
        }

        // Sole durability guarantee: one unconditional persist on the way out.
        self.persist(&corpus);

        if outcome == CrawlOutcome::Completed {
            tracing::info!(pages = corpus.total_pages, "Systematic crawl complete");
        } else {
            tracing::info!(
                last_oldid = corpus.last_oldid,
                pages = corpus.total_pages,
                "Stopped; run again to continue"
            );
        }

        Ok(CrawlReport {
            outcome,
            stats,
            last_oldid: corpus.last_oldid,
            total_pages: corpus.total_pages,
        })
    }

    /// Persist the corpus; a failed write is loud but not fatal, the run
    /// continues in memory and retries at the next cadence point.
    fn persist(&self, corpus: &crate::storage::Corpus) {
        if let Err(e) = self.store.save(corpus) {
            tracing::error!(error = %e, "CORPUS PERSIST FAILED; progress is at risk until the next successful save");
        }
    }
}
