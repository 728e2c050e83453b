//! RAG (Retrieval-Augmented Generation) module
//!
//! This module provides the question-answering pipeline over the BPG manuals:
//! - Document retrieval through the [`Retriever`] interface
//! - Context assembly from retrieved fragments
//! - Prompt construction with the configured strategy
//! - LLM-based answer generation and response validation
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use bpgrag::config::AppConfig;
//! use bpgrag::llm::OllamaClient;
//! use bpgrag::rag::InMemoryRetriever;
//! use bpgrag::rag::RagSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let retriever = Arc::new(InMemoryRetriever::from_json_file(config.corpus_path())?);
//!     let llm = Arc::new(OllamaClient::new(&config.llm)?);
//!     let session = RagSession::new(&config, retriever, llm)?;
//!
//!     let answer = session.query("¿Qué pendiente debe tener la rampa de carga?").await?;
//!     println!("Answer: {}", answer.answer);
//!     println!("Sources: {} fragments", answer.num_docs_used);
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod retriever;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

pub use context::ContextAssembler;
pub use pipeline::RagAnswer;
pub use pipeline::RagQuery;
pub use pipeline::RagSession;
pub use retriever::InMemoryRetriever;

use crate::errors::Result;

/// A corpus chunk as stored by the document backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A chunk returned for a query, best match first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// 1-based position in the result list
    pub rank: usize,
    pub text: String,
    pub metadata: HashMap<String, String>,
    /// `1 / (1 + distance)`, in (0, 1]
    pub similarity: f32,
    pub distance: f32,
}

impl RetrievedDocument {
    /// Build a result from a backend distance, deriving the similarity
    #[must_use]
    pub fn from_distance(
        rank: usize,
        text: String,
        metadata: HashMap<String, String>,
        distance: f32,
    ) -> Self {
        Self {
            rank,
            text,
            metadata,
            similarity: round4(1.0 / (1.0 + distance)),
            distance: round4(distance),
        }
    }
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

/// Top-k search over the document corpus
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>>;

    /// Number of documents available to search
    fn document_count(&self) -> usize;
}
