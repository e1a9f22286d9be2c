//! CLI module for GRAIL.
//!
//! Command-line parsing for the `grail` binary. Uses clap for argument
//! parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GRAIL - Grounded Retrieval Augmented Inference Loop
///
/// A local-first question-answering CLI: documents are chunked, embedded
/// via Ollama, and indexed in memory; answers are grounded in the
/// retrieved chunks.
#[derive(Parser, Debug)]
#[command(
    name = "grail",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "GRAIL - Grounded Retrieval Augmented Inference Loop",
    long_about = "A local-first RAG question-answering CLI.\n\
                  Documents are chunked, embedded via a local Ollama server, and indexed\n\
                  in memory; answers are generated only from the retrieved chunks.\n\n\
                  Run without arguments to start the interactive loop, or use 'ask' for\n\
                  a one-shot question.",
    after_help = "EXAMPLES:\n    \
                  grail                                  # Interactive loop over the sample corpus\n    \
                  grail --docs-dir ./notes               # Index a directory of markdown files\n    \
                  grail --docs-url https://example.com   # Index a fetched web page\n    \
                  grail ask \"How do I reset my password?\"\n    \
                  grail init                             # Scaffold a default grail.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "grail.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Index a directory of text files instead of the configured source
    #[arg(long, global = true, value_name = "PATH")]
    pub docs_dir: Option<PathBuf>,

    /// Index a fetched web page instead of the configured source
    #[arg(long, global = true, value_name = "URL")]
    pub docs_url: Option<String>,

    /// Override the maximum chunk length in characters
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    /// Override the number of chunks retrieved per query
    #[arg(long, global = true)]
    pub top_k: Option<usize>,

    /// Override the Ollama base URL
    #[arg(long, global = true, value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question and exit
    Ask {
        /// The question to answer
        question: String,

        /// Also print the retrieved chunks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a default grail.toml configuration file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Validate the configuration and report the result
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
