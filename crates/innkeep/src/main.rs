//! innkeep - per-user semantic memory for guest reviews.
//!
//! Main entry point for the innkeep CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{Context, add, ask, import, reply, reset, search, summarize};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// innkeep - per-user semantic memory for guest reviews
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file path (default: ./innkeep.toml, then user config dir)
    #[arg(long, global = true, env = "INNKEEP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store one guest comment with structured metadata
    Add(add::AddArgs),

    /// Bulk-import reviews from a JSON file
    Import(import::ImportArgs),

    /// Semantic search through a user's memories
    Search(search::SearchArgs),

    /// Answer a question from retrieved memories
    Ask(ask::AskArgs),

    /// Summarize guest reviews for a hotel
    Summarize(summarize::SummarizeArgs),

    /// Draft a reply to a guest comment
    Reply(reply::ReplyArgs),

    /// Delete all memories for a user
    Reset(reset::ResetArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("innkeep=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = innkeep_config::load_config(cli.config.as_deref())?;
    let ctx = Context {
        config,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Add(args) => add::run(args, &ctx).await,
        Commands::Import(args) => import::run(args, &ctx).await,
        Commands::Search(args) => search::run(args, &ctx).await,
        Commands::Ask(args) => ask::run(args, &ctx).await,
        Commands::Summarize(args) => summarize::run(args, &ctx).await,
        Commands::Reply(args) => reply::run(args, &ctx).await,
        Commands::Reset(args) => reset::run(args, &ctx).await,
    }
}
