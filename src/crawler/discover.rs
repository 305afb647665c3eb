//! Random-discovery crawl
//!
//! No natural upper bound exists on random draws, so the run is driven by a
//! target count of unique pages. Each round issues `min(concurrency, need)`
//! random fetches; a draw whose resolved URL is already in the checkpoint is
//! silently discarded and the wasted slot is only reclaimed on the next
//! round unless `refill_duplicate_slots` is set. Checkpoints are written
//! atomically whenever the accepted count crosses a multiple of the
//! interval, and once more before finalization; only after the completed
//! corpus plus its summary are on disk is the checkpoint deleted.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::DiscoverConfig;
use crate::crawler::PageFetcher;
use crate::models::{CrawlOutcome, CrawlStats};
use crate::storage::checkpoint::{CheckpointStore, DiscoveryCheckpoint};
use crate::storage::write_completed_corpus;

/// Result of a discovery crawl run
#[derive(Debug)]
pub struct DiscoveryReport {
    pub outcome: CrawlOutcome,
    pub stats: CrawlStats,

    /// Unique pages held at exit
    pub total_pages: usize,
}

/// Drives the random-discovery crawl
pub struct DiscoveryCrawler {
    fetcher: PageFetcher,
    checkpoints: CheckpointStore,
    corpus_path: PathBuf,
    summary_path: PathBuf,
    config: DiscoverConfig,
    max_concurrent: usize,
    batch_delay: Duration,
    shutdown: Arc<AtomicBool>,
}

impl DiscoveryCrawler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fetcher: PageFetcher,
        checkpoints: CheckpointStore,
        corpus_path: PathBuf,
        summary_path: PathBuf,
        config: DiscoverConfig,
        max_concurrent: usize,
        batch_delay: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            fetcher,
            checkpoints,
            corpus_path,
            summary_path,
            config,
            max_concurrent,
            batch_delay,
            shutdown,
        }
    }

    /// Run until the target page count is reached or the run is interrupted
    ///
    /// Idempotent once the target is met: a re-run finalizes immediately
    /// without issuing any fetches.
    pub async fn run(&self) -> Result<DiscoveryReport> {
        let mut checkpoint = self.checkpoints.load().unwrap_or_default();
        let target = self.config.target_pages;
        let interval = self.config.checkpoint_interval;
        let mut saved_marker = checkpoint.len() / interval;
        let mut stats = CrawlStats::default();

        tracing::info!(
            target,
            resumed_pages = checkpoint.len(),
            concurrency = self.max_concurrent,
            "Starting discovery crawl"
        );

        while checkpoint.len() < target {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!(pages = checkpoint.len(), "Discovery interrupted");
                self.persist(&mut checkpoint);
                return Ok(DiscoveryReport {
                    outcome: CrawlOutcome::Interrupted,
                    stats,
                    total_pages: checkpoint.len(),
                });
            }

            let need = target - checkpoint.len();
            let mut round = need.min(self.max_concurrent);

            loop {
                let fetches = (0..round).map(|_| self.fetcher.fetch_random());
                let results = futures::future::join_all(fetches).await;

                let mut accepted_now = 0usize;
                let mut duplicates_now = 0usize;
                for result in results {
                    match result {
                        Ok(page) => {
                            let url = page.url.clone();
                            if checkpoint.accept(page) {
                                stats.accepted += 1;
                                accepted_now += 1;
                            } else {
                                stats.duplicates += 1;
                                duplicates_now += 1;
                                tracing::debug!(url = %url, "Duplicate page discarded");
                            }
                        }
                        Err(e) => {
                            stats.failed += 1;
                            tracing::warn!(error = %e, "Random fetch failed");
                        }
                    }
                }

                // Optional refill: re-issue the slots lost to duplicates, but
                // only while the round is still making progress.
                if self.config.refill_duplicate_slots
                    && duplicates_now > 0
                    && accepted_now > 0
                    && checkpoint.len() < target
                {
                    round = duplicates_now.min(target - checkpoint.len());
                    continue;
                }
                break;
            }

            if checkpoint.len() / interval > saved_marker {
                self.persist(&mut checkpoint);
                saved_marker = checkpoint.len() / interval;
            }

            tracing::info!(
                pages = checkpoint.len(),
                target,
                duplicates = stats.duplicates,
                failed = stats.failed,
                "Discovery round complete"
            );

            if checkpoint.len() < target {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        let total_pages = checkpoint.len();

        // A current checkpoint must be on disk before finalization is
        // attempted: if the corpus write fails, nothing accepted since the
        // last interval save may be lost.
        self.persist(&mut checkpoint);

        write_completed_corpus(
            &self.corpus_path,
            &self.summary_path,
            checkpoint.scraped_data,
        )?;
        self.checkpoints.delete()?;

        tracing::info!(pages = total_pages, "Discovery crawl complete");

        Ok(DiscoveryReport {
            outcome: CrawlOutcome::Completed,
            stats,
            total_pages,
        })
    }

    fn persist(&self, checkpoint: &mut DiscoveryCheckpoint) {
        if let Err(e) = self.checkpoints.save(checkpoint) {
            tracing::error!(error = %e, "CHECKPOINT PERSIST FAILED; progress is at risk until the next successful save");
        }
    }
}
