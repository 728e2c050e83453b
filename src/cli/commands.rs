//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "bpgrag")]
#[command(about = "Asistente RAG sobre manuales de Buenas Prácticas Ganaderas")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a TOML configuration file (default: config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Built-in configuration preset (default, dev, fast, technical)
    #[arg(long, global = true, conflicts_with = "config")]
    pub preset: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single question against the BPG manuals
    Ask {
        /// The question to answer
        question: String,
        /// Number of fragments to retrieve
        #[arg(short)]
        k: Option<usize>,
        /// Sampling temperature (0.0-1.0)
        #[arg(short, long)]
        temperature: Option<f32>,
        /// Maximum tokens to generate (default: strategy recommendation)
        #[arg(long)]
        max_tokens: Option<usize>,
        /// Prompt strategy for this question
        #[arg(short, long)]
        strategy: Option<String>,
        /// Print the full validation report
        #[arg(long)]
        report: bool,
        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },
    /// Retrieve fragments for a question without generating an answer
    Search {
        /// The question to search for
        question: String,
        /// Number of fragments to retrieve
        #[arg(short)]
        k: Option<usize>,
    },
    /// Interactive question loop
    Chat,
    /// Validate an answer against its context and question
    Validate {
        /// Answer text, or @path to read it from a file
        #[arg(short, long)]
        response: String,
        /// Context text, or @path to read it from a file
        #[arg(short, long, default_value = "")]
        context: String,
        /// Question text, or @path to read it from a file
        #[arg(short, long)]
        query: String,
        /// Also run the strict checks
        #[arg(long)]
        strict: bool,
        /// Minimum answer length in characters
        #[arg(long)]
        min_length: Option<usize>,
        /// Maximum answer length in characters
        #[arg(long)]
        max_length: Option<usize>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt a strategy builds for a context and question
    Prompt {
        /// Strategy name (standard, concise, fewshot, technical)
        #[arg(short, long, default_value = "standard")]
        strategy: String,
        /// Context text, or @path to read it from a file
        #[arg(short, long)]
        context: String,
        /// Question text, or @path to read it from a file
        #[arg(short, long)]
        query: String,
    },
    /// List available prompt strategies
    Strategies,
    /// Show current configuration
    Config,
    /// Check Ollama availability and the document corpus
    Check,
}
