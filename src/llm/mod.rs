//! Language model access
//!
//! The RAG session talks to the model through [`LanguageModel`]; the
//! production backend is [`OllamaClient`].

pub mod ollama;

use std::time::Duration;

use async_trait::async_trait;

pub use ollama::OllamaClient;

use crate::errors::Result;

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Text produced by the model
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    /// Model-reported evaluation time
    pub total_duration: Duration,
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Generation>;
}
