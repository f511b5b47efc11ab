//! `ragdb` command-line front end for the hybrid retriever.
//!
//! ```bash
//! ragdb search "how do I reset the breaker" -k 3
//! ragdb ask "how do I reset the breaker" --mode baseline --json
//! ```

mod answer;
mod output;
mod startup;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ragdb_core::config::{Config, RetrievalSettings};
use ragdb_core::types::RetrievalMode;

/// Search a chunked document corpus with dense + BM25 fused ranking.
#[derive(Parser)]
#[command(name = "ragdb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding config.toml (default: current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the ranked candidates for a query
    Search(QueryArgs),
    /// Answer from the top candidate, or abstain when confidence is low
    Ask(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    query: String,

    /// Number of results (default: retrieval.default_k)
    #[arg(short = 'k', long = "top-k")]
    k: Option<usize>,

    /// baseline or fused (default: retrieval.default_mode)
    #[arg(short, long)]
    mode: Option<RetrievalMode>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl QueryArgs {
    fn resolve(&self, defaults: &RetrievalSettings) -> (usize, RetrievalMode) {
        (self.k.unwrap_or(defaults.default_k), self.mode.unwrap_or(defaults.default_mode))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { EnvFilter::new("info") } else { EnvFilter::new("warn") };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();

    let config = match &cli.config_dir {
        Some(dir) => {
            let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
            Config::load_from(dir, &env_name)
        }
        None => Config::load(),
    }
    .map_err(|e| {
        eprintln!("Error loading config: {e:#}");
        e
    })?;
    let settings = config.settings()?;
    let retriever = startup::build_retriever(&settings)?;

    match &cli.command {
        Command::Search(args) => {
            let (k, mode) = args.resolve(&settings.retrieval);
            let result = retriever.retrieve(&args.query, k, mode)?;
            let out = if args.json { output::format_json(&result)? } else { output::format_search(&args.query, mode, &result) };
            println!("{out}");
        }
        Command::Ask(args) => {
            let (k, mode) = args.resolve(&settings.retrieval);
            let result = retriever.retrieve(&args.query, k, mode)?;
            let answer = answer::answer(result, mode, settings.answer.confidence_threshold);
            let out = if args.json { output::format_json(&answer)? } else { output::format_answer(&answer) };
            println!("{out}");
        }
    }
    Ok(())
}
