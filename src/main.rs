use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wikisage::commands;
use wikisage::config::Config;

#[derive(Parser)]
#[command(
    name = "wikisage",
    version,
    about = "Resumable wiki crawler with keyword-weighted question answering",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (environment variables are used otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the wiki systematically over a revision-id range
    Crawl {
        /// First oldid (inclusive); overrides config
        #[arg(long)]
        start: Option<u64>,

        /// Last oldid (inclusive); overrides config
        #[arg(long)]
        end: Option<u64>,
    },

    /// Crawl random pages until a target count of unique pages is reached
    Discover {
        /// Target number of unique pages; overrides config
        #[arg(short, long)]
        target: Option<usize>,
    },

    /// Answer a single question from the scraped corpus
    Ask {
        /// The question to answer
        question: String,
    },

    /// Interactive chat over the scraped corpus
    Chat,

    /// Remove pages whose title contains a fragment and rewrite the corpus
    Curate {
        /// Title fragment to remove
        fragment: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Crawl { start, end } => {
            tracing::info!(start = ?start, end = ?end, "Starting crawl command");
            commands::crawl(config, start, end).await?;
        }

        Commands::Discover { target } => {
            tracing::info!(target = ?target, "Starting discover command");
            commands::discover(config, target).await?;
        }

        Commands::Ask { question } => {
            commands::ask(config, question).await?;
        }

        Commands::Chat => {
            commands::chat(config).await?;
        }

        Commands::Curate { fragment } => {
            commands::curate(config, fragment).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("wikisage=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("wikisage=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
