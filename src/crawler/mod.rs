//! Crawl orchestration
//!
//! Two crawl strategies share one fetcher: [`systematic`] walks a revision-id
//! range behind a resume cursor, [`discover`] draws random pages until a
//! target count of unique pages is reached. Both follow the same shape: fetch
//! tasks return results purely, and the orchestrating loop performs every
//! merge and persist sequentially between batches, so no lock ever guards the
//! crawl state and no fetch permit is held across a checkpoint write.

pub mod discover;
pub mod fetcher;
pub mod systematic;

pub use discover::DiscoveryCrawler;
pub use fetcher::PageFetcher;
pub use systematic::SystematicCrawler;
