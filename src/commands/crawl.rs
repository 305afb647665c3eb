use anyhow::{Context, Result};

use crate::config::Config;
use crate::crawler::{PageFetcher, SystematicCrawler};
use crate::models::CrawlOutcome;
use crate::storage::PageStore;

/// Run the systematic oldid-range crawl
pub async fn crawl(mut config: Config, start: Option<u64>, end: Option<u64>) -> Result<()> {
    if let Some(start) = start {
        config.crawler.start_oldid = start;
    }
    if let Some(end) = end {
        config.crawler.end_oldid = end;
    }
    config.validate()?;

    println!("Systematic wiki crawl");
    println!("=====================");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Range: oldid {} to {}",
        config.crawler.start_oldid, config.crawler.end_oldid
    );
    println!("  Concurrent requests: {}", config.crawler.max_concurrent);
    println!(
        "  Saving every {} pages to {}",
        config.crawler.checkpoint_every,
        config.corpus.corpus_path.display()
    );

    let fetcher = PageFetcher::new(&config.crawler).context("Failed to create fetcher")?;
    let store = PageStore::new(&config.corpus.corpus_path);
    let shutdown = super::shutdown_flag();

    let crawler = SystematicCrawler::new(fetcher, store, config.crawler, shutdown);
    let report = crawler.run().await?;

    println!();
    match report.outcome {
        CrawlOutcome::Completed => {
            println!("Completed: all revisions up to oldid {} processed", report.last_oldid);
        }
        CrawlOutcome::Interrupted => {
            println!(
                "Stopped at oldid {}; run the same command again to continue",
                report.last_oldid
            );
        }
    }
    println!(
        "Pages collected: {} (+{} this run, {} fetches failed)",
        report.total_pages, report.stats.accepted, report.stats.failed
    );

    Ok(())
}
