use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "churn-encoder")]
#[command(about = "Churn model encoder: classify queries, normalize patterns, inspect the schema.")]
pub(crate) struct Cli {
    /// Override config directory (user settings live under `<conf>/churn-encoder/`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Classify a free-text question and print the attributes as JSON.
    Query {
        /// Question text
        text: String,
    },
    /// Normalize a pattern JSONL file; prints one record per line.
    Records {
        /// Pattern file (default: `data.patterns_path` from settings)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print metrics-only attributes for each customer snapshot, one per line.
    Customers {
        /// Customer fixture (default: `data.customers_path` from settings)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the encoder config as JSON.
    Config {
        /// Print the config's JSON Schema instead
        #[arg(long)]
        json_schema: bool,
    },
    /// Validate the schema against the attribute keys, then parse every pattern.
    Validate {
        /// Pattern file (default: `data.patterns_path` from settings)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}
