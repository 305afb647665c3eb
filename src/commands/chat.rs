use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::llm::HttpGenerator;
use crate::query::Assistant;
use crate::storage::load_query_pages;

/// Interactive terminal chat over the corpus
pub async fn chat(config: Config) -> Result<()> {
    let pages = load_query_pages(&config.corpus)?;

    let generator = HttpGenerator::new(&config.llm).context("Failed to create generator")?;
    let assistant = Assistant::new(generator, pages, config.llm.context_pages);

    println!("Wiki chat ({} pages loaded)", assistant.corpus_len());
    println!("Ask anything about the wiki. Type 'quit', 'exit' or 'bye' to stop.");
    println!("----------------------------------------");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"\nYou: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "bye" | "q") {
            break;
        }

        let answer = assistant.answer(input).await;
        println!("Assistant: {answer}");
    }

    println!("Goodbye!");
    Ok(())
}
