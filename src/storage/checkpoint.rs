//! In-progress checkpoint for random-discovery crawls
//!
//! The checkpoint is the sole duplicate-suppression oracle for discovery
//! mode: every accepted page's URL appears exactly once in `scraped_urls`,
//! and the set can be rebuilt identically from `scraped_data` if it is ever
//! lost or inconsistent (it is rebuilt on load when the counts disagree).
//!
//! Saves are atomic (write-temp-then-rename); the file is deleted once the
//! crawl reaches its target, at which point the completed corpus takes over
//! as the durable form.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::models::Page;
use crate::storage::write_json_atomic;

/// State of an in-progress random-discovery crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryCheckpoint {
    /// Accepted pages, in acceptance order
    pub scraped_data: Vec<Page>,

    /// Resolved URLs of every accepted page
    pub scraped_urls: HashSet<String>,

    pub last_saved: DateTime<Utc>,

    pub total_pages_scraped: usize,
}

impl Default for DiscoveryCheckpoint {
    fn default() -> Self {
        Self {
            scraped_data: Vec::new(),
            scraped_urls: HashSet::new(),
            last_saved: Utc::now(),
            total_pages_scraped: 0,
        }
    }
}

impl DiscoveryCheckpoint {
    /// Number of accepted pages
    pub fn len(&self) -> usize {
        self.scraped_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scraped_data.is_empty()
    }

    /// Whether this URL has already been accepted
    pub fn contains_url(&self, url: &str) -> bool {
        self.scraped_urls.contains(url)
    }

    /// Accept a page unless its URL is already present
    ///
    /// Returns `false` for a duplicate, which is silently discarded by the
    /// crawler: it counts as neither progress nor an error.
    pub fn accept(&mut self, page: Page) -> bool {
        if !self.scraped_urls.insert(page.url.clone()) {
            return false;
        }
        self.scraped_data.push(page);
        self.total_pages_scraped = self.scraped_data.len();
        true
    }

    /// Rebuild `scraped_urls` from `scraped_data`
    fn rebuild_urls(&mut self) {
        self.scraped_urls = self
            .scraped_data
            .iter()
            .map(|page| page.url.clone())
            .collect();
    }
}

/// Manages the checkpoint file for discovery crawls
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the checkpoint if one exists
    ///
    /// A malformed checkpoint is logged and treated as absent; an
    /// inconsistent URL set is rebuilt from the page list.
    pub fn load(&self) -> Option<DiscoveryCheckpoint> {
        if !self.path.exists() {
            return None;
        }

        let checkpoint = File::open(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|file| {
                serde_json::from_reader::<_, DiscoveryCheckpoint>(BufReader::new(file))
                    .context("Failed to parse checkpoint")
            });

        match checkpoint {
            Ok(mut state) => {
                if state.scraped_urls.len() != state.scraped_data.len() {
                    tracing::warn!(
                        urls = state.scraped_urls.len(),
                        pages = state.scraped_data.len(),
                        "Checkpoint URL set inconsistent, rebuilding from pages"
                    );
                    state.rebuild_urls();
                }
                state.total_pages_scraped = state.scraped_data.len();
                tracing::info!(
                    path = %self.path.display(),
                    pages = state.len(),
                    "Resuming from checkpoint"
                );
                Some(state)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Checkpoint unreadable, starting fresh"
                );
                None
            }
        }
    }

    /// Persist the checkpoint atomically, stamping `last_saved`
    pub fn save(&self, checkpoint: &mut DiscoveryCheckpoint) -> Result<()> {
        checkpoint.last_saved = Utc::now();
        checkpoint.total_pages_scraped = checkpoint.scraped_data.len();
        write_json_atomic(&self.path, checkpoint)?;
        tracing::debug!(
            path = %self.path.display(),
            pages = checkpoint.len(),
            "Checkpoint saved"
        );
        Ok(())
    }

    /// Delete the checkpoint file after a completed crawl
    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to delete checkpoint: {}", self.path.display())
            })?;
            tracing::debug!(path = %self.path.display(), "Checkpoint deleted");
        }
        Ok(())
    }
}
