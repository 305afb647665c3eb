//! Corpus persistence
//!
//! Two durable forms exist for two lifecycle stages: the systematic-mode
//! corpus file (also the completed form for oldid crawls) and the completed
//! random-discovery corpus with its human-readable sibling summary. The
//! in-progress discovery checkpoint lives in [`checkpoint`].
//!
//! Every durable write goes through write-temp-then-atomic-rename, so a
//! crash mid-write can never corrupt previously committed state.

pub mod checkpoint;

pub use checkpoint::{CheckpointStore, DiscoveryCheckpoint};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::Page;
use crate::utils::truncate_text;

/// Persisted corpus for systematic (oldid-range) crawls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub pages: Vec<Page>,
    pub total_pages: usize,
    pub last_updated: DateTime<Utc>,

    /// Last processed revision id; the resume cursor
    pub last_oldid: u64,
}

impl Default for Corpus {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            total_pages: 0,
            last_updated: Utc::now(),
            last_oldid: 0,
        }
    }
}

impl Corpus {
    /// Append a page and refresh the derived fields
    pub fn push(&mut self, page: Page) {
        self.pages.push(page);
        self.total_pages = self.pages.len();
        self.last_updated = Utc::now();
    }
}

/// Completed random-discovery corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedCorpus {
    pub scraped_at: DateTime<Utc>,
    pub total_pages: usize,
    pub pages: Vec<Page>,
}

impl CompletedCorpus {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            scraped_at: Utc::now(),
            total_pages: pages.len(),
            pages,
        }
    }
}

/// Owns the corpus file paths and all load/save logic
pub struct PageStore {
    corpus_path: PathBuf,
}

impl PageStore {
    pub fn new(corpus_path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_path: corpus_path.into(),
        }
    }

    /// Load the systematic corpus
    ///
    /// A missing file starts a fresh corpus. A malformed file is logged and
    /// also starts fresh rather than aborting the run.
    pub fn load(&self) -> Corpus {
        if !self.corpus_path.exists() {
            tracing::info!(path = %self.corpus_path.display(), "No existing corpus, starting fresh");
            return Corpus::default();
        }

        match self.read_corpus() {
            Ok(corpus) => {
                tracing::info!(
                    path = %self.corpus_path.display(),
                    pages = corpus.pages.len(),
                    last_oldid = corpus.last_oldid,
                    "Loaded corpus"
                );
                corpus
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.corpus_path.display(),
                    error = %e,
                    "Corpus file unreadable, starting fresh"
                );
                Corpus::default()
            }
        }
    }

    fn read_corpus(&self) -> Result<Corpus> {
        let file = File::open(&self.corpus_path)
            .with_context(|| format!("Failed to open corpus: {}", self.corpus_path.display()))?;
        let mut corpus: Corpus =
            serde_json::from_reader(BufReader::new(file)).context("Failed to parse corpus")?;
        corpus.total_pages = corpus.pages.len();
        Ok(corpus)
    }

    /// Persist the systematic corpus atomically
    pub fn save(&self, corpus: &Corpus) -> Result<()> {
        write_json_atomic(&self.corpus_path, corpus)?;
        tracing::info!(
            path = %self.corpus_path.display(),
            pages = corpus.total_pages,
            last_oldid = corpus.last_oldid,
            "Corpus saved"
        );
        Ok(())
    }

    /// Load only the pages, for read-only query-time use
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let corpus = self.read_corpus()?;
        Ok(corpus.pages)
    }

    /// Remove every page whose title contains `fragment` and rewrite the
    /// corpus file. Returns the number of pages removed.
    pub fn curate(&self, fragment: &str) -> Result<usize> {
        let mut corpus = self.read_corpus()?;
        let before = corpus.pages.len();
        corpus.pages.retain(|page| !page.title.contains(fragment));
        corpus.total_pages = corpus.pages.len();
        corpus.last_updated = Utc::now();
        self.save(&corpus)?;
        Ok(before - corpus.pages.len())
    }
}

/// Load pages for query-time use from whichever corpus exists
///
/// Prefers the systematic corpus file, falling back to a completed
/// discovery corpus. Query-time access is read-only.
pub fn load_query_pages(config: &crate::config::CorpusConfig) -> Result<Vec<Page>> {
    if config.corpus_path.exists() {
        return PageStore::new(&config.corpus_path).load_pages();
    }
    if config.discovery_corpus_path.exists() {
        let file = File::open(&config.discovery_corpus_path).with_context(|| {
            format!(
                "Failed to open corpus: {}",
                config.discovery_corpus_path.display()
            )
        })?;
        let completed: CompletedCorpus =
            serde_json::from_reader(BufReader::new(file)).context("Failed to parse corpus")?;
        return Ok(completed.pages);
    }
    anyhow::bail!(
        "No corpus found at {} or {}; run a crawl first",
        config.corpus_path.display(),
        config.discovery_corpus_path.display()
    )
}

/// Write the completed discovery corpus and its sibling summary
pub fn write_completed_corpus(
    corpus_path: &Path,
    summary_path: &Path,
    pages: Vec<Page>,
) -> Result<CompletedCorpus> {
    let completed = CompletedCorpus::new(pages);
    write_json_atomic(corpus_path, &completed)?;
    write_summary(summary_path, &completed)?;
    tracing::info!(
        path = %corpus_path.display(),
        pages = completed.total_pages,
        "Completed corpus written"
    );
    Ok(completed)
}

/// Human-readable listing of the completed corpus
fn write_summary(path: &Path, corpus: &CompletedCorpus) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Wiki corpus summary")?;
    writeln!(writer, "Scraped at: {}", corpus.scraped_at.to_rfc3339())?;
    writeln!(writer, "Total pages: {}", corpus.total_pages)?;
    writeln!(writer)?;

    for (i, page) in corpus.pages.iter().enumerate() {
        writeln!(writer, "{}. {} ({} words)", i + 1, page.title, page.word_count)?;
        writeln!(writer, "   URL: {}", page.url)?;
        if !page.categories.is_empty() {
            let cats: Vec<&str> = page.categories.iter().take(5).map(String::as_str).collect();
            writeln!(writer, "   Categories: {}", cats.join(", "))?;
        }
        writeln!(writer, "   {}", truncate_text(&page.content, 120))?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize `value` to a temp file next to `path`, then atomically rename
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let temp_path = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => path.with_extension(format!("{ext}.tmp")),
        None => path.with_extension("tmp"),
    };

    let file = File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to serialize state")?;
    writer.flush().context("Failed to flush state")?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;

    Ok(())
}
