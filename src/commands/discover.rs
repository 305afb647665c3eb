use anyhow::{Context, Result};

use crate::config::Config;
use crate::crawler::{DiscoveryCrawler, PageFetcher};
use crate::models::CrawlOutcome;
use crate::storage::checkpoint::CheckpointStore;

/// Run the random-discovery crawl to a target page count
pub async fn discover(mut config: Config, target: Option<usize>) -> Result<()> {
    if let Some(target) = target {
        config.discover.target_pages = target;
    }
    config.validate()?;

    println!("Random-discovery wiki crawl");
    println!("===========================");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Target pages: {}", config.discover.target_pages);
    println!(
        "  Checkpoint every {} pages at {}",
        config.discover.checkpoint_interval,
        config.corpus.checkpoint_path.display()
    );

    let fetcher = PageFetcher::new(&config.crawler).context("Failed to create fetcher")?;
    let checkpoints = CheckpointStore::new(&config.corpus.checkpoint_path);
    let shutdown = super::shutdown_flag();

    let crawler = DiscoveryCrawler::new(
        fetcher,
        checkpoints,
        config.corpus.discovery_corpus_path.clone(),
        config.corpus.summary_path.clone(),
        config.discover.clone(),
        config.crawler.max_concurrent,
        config.crawler.batch_delay(),
        shutdown,
    );
    let report = crawler.run().await?;

    println!();
    match report.outcome {
        CrawlOutcome::Completed => {
            println!(
                "Completed: {} unique pages written to {}",
                report.total_pages,
                config.corpus.discovery_corpus_path.display()
            );
            println!("Summary: {}", config.corpus.summary_path.display());
        }
        CrawlOutcome::Interrupted => {
            println!(
                "Stopped with {} pages; checkpoint kept, run again to continue",
                report.total_pages
            );
        }
    }
    println!(
        "Fetch attempts: {} ({} duplicates discarded, {} failed)",
        report.stats.attempts(),
        report.stats.duplicates,
        report.stats.failed
    );

    Ok(())
}
