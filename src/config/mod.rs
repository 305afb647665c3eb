//! Configuration management for the wikisage crawler
//!
//! Configuration is an explicit immutable value constructed once at startup
//! (from environment variables or a TOML file) and passed into the crawler
//! and query constructors; nothing reads ambient global state after that.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Random-discovery crawl configuration
    pub discover: DiscoverConfig,

    /// Corpus and checkpoint file locations
    pub corpus: CorpusConfig,

    /// Text-generation endpoint configuration
    pub llm: LlmConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the target wiki
    pub base_url: String,

    /// Maximum number of concurrent in-flight fetches (admission gate size)
    pub max_concurrent: usize,

    /// Rate limit (requests per second)
    pub rate_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,

    /// Delay between batches in milliseconds (deliberate rate limit)
    pub batch_delay_ms: u64,

    /// Persist the corpus after this many newly accepted pages
    pub checkpoint_every: usize,

    /// First revision id of the systematic range (inclusive)
    pub start_oldid: u64,

    /// Last revision id of the systematic range (inclusive)
    pub end_oldid: u64,
}

/// Random-discovery crawl configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// Stop once this many unique pages have been accepted
    pub target_pages: usize,

    /// Write a checkpoint every time this many pages have been accepted
    pub checkpoint_interval: usize,

    /// Re-issue fetches within a round to replace slots lost to duplicate
    /// draws. Off by default: a duplicate then wastes its request slot and
    /// the shortfall is only reclaimed on the next round, which can slow
    /// convergence when the duplicate rate is high.
    pub refill_duplicate_slots: bool,
}

/// Corpus and checkpoint file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Systematic-mode corpus file
    pub corpus_path: PathBuf,

    /// Completed random-discovery corpus file
    pub discovery_corpus_path: PathBuf,

    /// Human-readable summary written next to the discovery corpus
    pub summary_path: PathBuf,

    /// In-progress random-discovery checkpoint file
    pub checkpoint_path: PathBuf,
}

/// Text-generation endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Generation endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Number of top-ranked pages handed to the generator as context
    pub context_pages: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("WIKISAGE_BASE_URL")
            .unwrap_or_else(|_| String::from("https://wiki.fosscell.org"));

        let user_agent = std::env::var("WIKISAGE_USER_AGENT").unwrap_or_else(|_| {
            String::from(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )
        });

        let endpoint = std::env::var("WIKISAGE_LLM_ENDPOINT").unwrap_or_else(|_| {
            String::from("https://tools.originality.ai/tool-ai-prompt-generator/backend/generate.php")
        });

        let corpus_path = std::env::var("WIKISAGE_CORPUS_PATH")
            .unwrap_or_else(|_| String::from("wiki_data.json"))
            .into();

        let config = Self {
            crawler: CrawlerConfig {
                base_url,
                max_concurrent: env_parse("WIKISAGE_MAX_CONCURRENT", 50),
                rate_limit: env_parse("WIKISAGE_RATE_LIMIT", 25),
                request_timeout_secs: env_parse("WIKISAGE_REQUEST_TIMEOUT", 30),
                user_agent,
                batch_delay_ms: env_parse("WIKISAGE_BATCH_DELAY_MS", 500),
                checkpoint_every: env_parse("WIKISAGE_CHECKPOINT_EVERY", 50),
                start_oldid: env_parse("WIKISAGE_START_OLDID", 1),
                end_oldid: env_parse("WIKISAGE_END_OLDID", 2606),
            },
            discover: DiscoverConfig {
                target_pages: env_parse("WIKISAGE_TARGET_PAGES", 100),
                checkpoint_interval: env_parse("WIKISAGE_CHECKPOINT_INTERVAL", 10),
                refill_duplicate_slots: env_parse("WIKISAGE_REFILL_DUPLICATES", false),
            },
            corpus: CorpusConfig {
                corpus_path,
                discovery_corpus_path: PathBuf::from("wiki_corpus.json"),
                summary_path: PathBuf::from("wiki_corpus_summary.txt"),
                checkpoint_path: PathBuf::from("scrape_checkpoint.json"),
            },
            llm: LlmConfig {
                endpoint,
                timeout_secs: env_parse("WIKISAGE_LLM_TIMEOUT", 30),
                context_pages: env_parse("WIKISAGE_CONTEXT_PAGES", 10),
            },
            logging: LoggingConfig {
                level: std::env::var("WIKISAGE_LOG_LEVEL").unwrap_or_else(|_| String::from("info")),
                format: std::env::var("WIKISAGE_LOG_FORMAT")
                    .unwrap_or_else(|_| String::from("text")),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.crawler.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.crawler.base_url))?;

        anyhow::ensure!(
            self.crawler.max_concurrent > 0,
            "max_concurrent must be greater than zero"
        );
        anyhow::ensure!(
            self.crawler.rate_limit > 0,
            "rate_limit must be greater than zero"
        );
        anyhow::ensure!(
            self.crawler.request_timeout_secs > 0,
            "request_timeout_secs must be greater than zero"
        );
        anyhow::ensure!(
            self.crawler.start_oldid <= self.crawler.end_oldid,
            "start_oldid must not exceed end_oldid"
        );
        anyhow::ensure!(
            self.discover.checkpoint_interval > 0,
            "checkpoint_interval must be greater than zero"
        );
        anyhow::ensure!(
            self.llm.context_pages > 0,
            "context_pages must be greater than zero"
        );

        Ok(())
    }

}

impl CrawlerConfig {
    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Inter-batch delay as a Duration
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                base_url: "https://wiki.example.org".to_string(),
                max_concurrent: 20,
                rate_limit: 10,
                request_timeout_secs: 30,
                user_agent: "test-agent".to_string(),
                batch_delay_ms: 500,
                checkpoint_every: 50,
                start_oldid: 1,
                end_oldid: 100,
            },
            discover: DiscoverConfig {
                target_pages: 10,
                checkpoint_interval: 10,
                refill_duplicate_slots: false,
            },
            corpus: CorpusConfig {
                corpus_path: PathBuf::from("wiki_data.json"),
                discovery_corpus_path: PathBuf::from("wiki_corpus.json"),
                summary_path: PathBuf::from("wiki_corpus_summary.txt"),
                checkpoint_path: PathBuf::from("scrape_checkpoint.json"),
            },
            llm: LlmConfig {
                endpoint: "http://localhost:9999/generate".to_string(),
                timeout_secs: 30,
                context_pages: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = base_config();
        config.crawler.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = base_config();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_oldid_range_rejected() {
        let mut config = base_config();
        config.crawler.start_oldid = 200;
        config.crawler.end_oldid = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_helpers() {
        let config = base_config();
        assert_eq!(config.crawler.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.crawler.batch_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = base_config();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.crawler.end_oldid, 100);
        assert_eq!(parsed.discover.target_pages, 10);
    }
}
