//! Ollama HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use super::Generation;
use super::GenerationParams;
use super::LanguageModel;
use crate::config::LlmConfig;
use crate::errors::BpgRagError;
use crate::errors::Result;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    /// Nanoseconds
    #[serde(default)]
    total_duration: u64,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Client for a local or remote Ollama server
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid TLS/backend configuration)
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, &config.base_url, &config.model))
    }

    pub fn with_client(client: Client, base_url: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of the models installed on the server
    ///
    /// # Errors
    /// - Network errors (server not running, timeouts)
    /// - Non-success status or malformed JSON from `/api/tags`
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(BpgRagError::Llm(format!(
                "Ollama returned status {} for {url}",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Whether the configured model is installed on the server
    pub async fn check_model(&self) -> Result<bool> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|name| name == &self.model))
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    /// Generate a completion with `stream: false`
    ///
    /// # Errors
    /// - Network errors (timeouts, connection failures)
    /// - Non-success status from `/api/generate` (status and body are reported)
    /// - Malformed JSON responses
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Generation> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        };

        debug!(
            "Calling Ollama model {} (temperature {}, max tokens {})",
            self.model, params.temperature, params.max_tokens
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BpgRagError::Llm(format!(
                "Ollama returned status {status}: {body}"
            )));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body.response.trim().to_string();
        info!("Generated answer ({} characters)", text.chars().count());

        Ok(Generation {
            text,
            total_duration: Duration::from_nanos(body.total_duration),
        })
    }
}
