use anyhow::{Context, Result};

use crate::config::Config;
use crate::llm::HttpGenerator;
use crate::query::Assistant;
use crate::storage::load_query_pages;

/// Answer a single question and print the response
pub async fn ask(config: Config, question: String) -> Result<()> {
    let pages = load_query_pages(&config.corpus)?;
    tracing::info!(pages = pages.len(), "Corpus loaded");

    let generator = HttpGenerator::new(&config.llm).context("Failed to create generator")?;
    let assistant = Assistant::new(generator, pages, config.llm.context_pages);

    let answer = assistant.answer(&question).await;
    println!("{answer}");

    Ok(())
}
