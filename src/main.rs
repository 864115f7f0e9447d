//! # Buddy — employee onboarding assistant
//!
//! Answers employee questions by combining an LLM with a curated FAQ and a
//! semantic knowledge base built from ingested documents.
//!
//! Usage:
//!   buddy chat                    # interactive session
//!   buddy ask "what is pto?"      # one-shot question
//!   buddy ingest knowledge.json   # ingest a document collection
//!   buddy stats                   # knowledge store statistics
//!   buddy clear                   # wipe the knowledge store

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buddy_agent::Agent;
use buddy_core::BuddyConfig;
use buddy_knowledge::{IngestOptions, KnowledgeStore, ingest_collection};
use buddy_providers::embeddings::OpenAiEmbedder;

#[derive(Parser)]
#[command(name = "buddy", version, about = "Employee onboarding assistant")]
struct Cli {
    /// Path to config file (default: ~/.buddy/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question to ask
        question: String,
    },
    /// Ingest a knowledge-base JSON file ({"documents": [...]})
    Ingest {
        /// Path to the knowledge-base file
        file: PathBuf,
    },
    /// Show knowledge store statistics
    Stats,
    /// Delete every chunk from the knowledge store
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "buddy=debug,buddy_agent=debug,buddy_knowledge=debug,buddy_providers=debug,buddy_tools=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => BuddyConfig::load_from(path)?,
        None => BuddyConfig::load()?,
    };
    tracing::debug!(
        "provider: {}, model: {}, store: {}",
        config.default_provider,
        config.default_model,
        config.knowledge_store_path().display()
    );

    match cli.command {
        Command::Chat => chat(&config).await,
        Command::Ask { question } => ask(&config, &question).await,
        Command::Ingest { file } => ingest(&config, &file).await,
        Command::Stats => stats(&config).await,
        Command::Clear => clear(&config).await,
    }
}

fn open_store(config: &BuddyConfig) -> Result<Arc<KnowledgeStore>> {
    let embedder = Arc::new(OpenAiEmbedder::new(config)?);
    Ok(Arc::new(KnowledgeStore::new(
        config.knowledge_store_path(),
        embedder,
    )))
}

fn build_agent(config: &BuddyConfig) -> Result<Agent> {
    let store = open_store(config)?;
    let provider = buddy_providers::create_provider(config)?;
    let tools = buddy_tools::default_registry(store, config);
    Ok(Agent::new(config, provider, tools))
}

async fn chat(config: &BuddyConfig) -> Result<()> {
    let agent = build_agent(config)?;
    println!(
        "{} is ready. Ask about the company, the product, or your onboarding. \
Type 'exit' to quit.\n",
        config.identity.name
    );

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let answer = agent.respond(line).await;
        println!("\n{}> {answer}\n", config.identity.name.to_lowercase());
    }
    Ok(())
}

async fn ask(config: &BuddyConfig, question: &str) -> Result<()> {
    let agent = build_agent(config)?;
    let answer = agent.respond(question).await;
    println!("{answer}");
    Ok(())
}

async fn ingest(config: &BuddyConfig, file: &PathBuf) -> Result<()> {
    let store = open_store(config)?;
    let options = IngestOptions {
        chunk_size: config.knowledge.chunk_size,
        overlap: config.knowledge.overlap,
    };

    let report = ingest_collection(&store, file, options).await?;
    println!(
        "Ingested {} document(s) ({} chunk(s)); {} skipped, {} failed.",
        report.documents_ingested,
        report.chunks_ingested,
        report.documents_skipped,
        report.documents_failed
    );

    print_stats(&store).await
}

async fn stats(config: &BuddyConfig) -> Result<()> {
    let store = open_store(config)?;
    print_stats(&store).await
}

async fn print_stats(store: &KnowledgeStore) -> Result<()> {
    let stats = store.stats().await?;
    println!("Knowledge store:");
    println!("  chunks:  {}", stats.total_chunks);
    println!("  sources: {}", stats.sources.join(", "));
    println!("  average chunk length: {} chars", stats.avg_chunk_length);
    Ok(())
}

async fn clear(config: &BuddyConfig) -> Result<()> {
    let store = open_store(config)?;
    store.clear().await?;
    println!("Knowledge store cleared.");
    Ok(())
}
