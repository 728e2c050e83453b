//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - ask: single questions and the interactive chat loop
//! - validate: offline answer validation and prompt inspection
//! - info: information display (strategies, config, health check)

pub mod ask;
pub mod info;
pub mod validate;

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

// Re-export all public handlers
pub use ask::*;
pub use info::*;
pub use validate::*;

use crate::cli::output::print_warning;
use crate::config::PRESET_NAMES;
use crate::llm::OllamaClient;
use crate::rag::InMemoryRetriever;
use crate::rag::RagSession;
use crate::AppConfig;
use crate::BpgRagError;
use crate::Result;

/// Resolve configuration: `--config` file, else `--preset`, else the default files
///
/// Runs before logging is installed, so problems are reported on stdout.
pub fn load_config(config_path: Option<&Path>, preset: Option<&str>) -> Result<AppConfig> {
    if let Some(path) = config_path {
        return AppConfig::from_file(path);
    }

    if let Some(name) = preset {
        if !PRESET_NAMES.contains(&name.trim().to_lowercase().as_str()) {
            print_warning(&format!(
                "Unknown preset '{name}', using default (available: {})",
                PRESET_NAMES.join(", ")
            ));
        }
        let config = AppConfig::preset(name);
        config.validate()?;
        return Ok(config);
    }

    or_defaults(AppConfig::load())
}

/// A missing config file falls back to built-in defaults; other errors propagate
fn or_defaults(loaded: Result<AppConfig>) -> Result<AppConfig> {
    match loaded {
        Err(BpgRagError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            print_warning("No config file found, using built-in defaults");
            Ok(AppConfig::default())
        }
        other => other,
    }
}

/// Build a RAG session over the configured corpus and Ollama server
pub fn build_session(config: &AppConfig) -> Result<RagSession> {
    let retriever = Arc::new(InMemoryRetriever::from_json_file(config.corpus_path())?);
    let llm = Arc::new(OllamaClient::new(&config.llm)?);
    RagSession::new(config, retriever, llm)
}

/// Resolve a text argument; `@path` reads the text from a file
pub fn read_input(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(arg.to_string()),
    }
}
