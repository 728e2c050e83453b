//! Complete RAG pipeline: Retrieve -> Prompt -> Generate -> Validate

use std::sync::Arc;
use std::time::Instant;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::llm::GenerationParams;
use crate::llm::LanguageModel;
use crate::prompts;
use crate::prompts::PromptStrategy;
use crate::prompts::PromptType;
use crate::rag::ContextAssembler;
use crate::rag::RetrievedDocument;
use crate::rag::Retriever;
use crate::validation::ResponseValidator;
use crate::validation::ValidationOutcome;
use crate::validation::ValidationReport;
use crate::validation::ValidatorConfig;

/// RAG session: backends, prompt strategy and validator, built once and shared
pub struct RagSession {
    config: AppConfig,
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LanguageModel>,
    context_assembler: ContextAssembler,
    strategy: &'static PromptStrategy,
    validator: Option<ResponseValidator>,
}

impl RagSession {
    /// Create a new RAG session
    ///
    /// # Errors
    /// - Configuration range errors (temperature, similarity, k, answer lengths)
    pub fn new(
        config: &AppConfig,
        retriever: Arc<dyn Retriever>,
        llm: Arc<dyn LanguageModel>,
    ) -> Result<Self> {
        config.validate()?;

        let strategy = prompts::get_by_name(config.prompt_strategy());
        let validator = config
            .validation_enabled()
            .then(|| ResponseValidator::new(ValidatorConfig::from_app_config(config)));

        info!(
            "RAG session ready: model {}, strategy {}, validation {}",
            llm.model_name(),
            strategy.name,
            if validator.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            config: config.clone(),
            retriever,
            llm,
            context_assembler: ContextAssembler::new(config.retrieval.max_context_length),
            strategy,
            validator,
        })
    }

    /// Perform a RAG query with configured defaults
    ///
    /// # Errors
    /// - Document retrieval errors
    /// - LLM generation errors (server unreachable, non-success status, malformed response)
    pub async fn query(&self, question: &str) -> Result<RagAnswer> {
        self.query_with_options(RagQuery::new(question)).await
    }

    /// Perform a RAG query with per-query overrides
    ///
    /// # Errors
    /// - Document retrieval errors
    /// - LLM generation errors (server unreachable, non-success status, malformed response)
    pub async fn query_with_options(&self, query: RagQuery) -> Result<RagAnswer> {
        info!("Processing RAG query: {}", query.question);
        let started = Instant::now();

        let k = query.k.unwrap_or(self.config.retrieval.default_k);
        let strategy = query
            .strategy
            .map_or(self.strategy, prompts::get_by_type);
        let temperature = query
            .temperature
            .unwrap_or(self.config.generation.default_temperature);
        let max_tokens = query
            .max_tokens
            .unwrap_or(strategy.max_tokens_recommended);

        // Step 1: Retrieve relevant documents
        debug!("Step 1: Retrieving up to {} documents", k);
        let documents = self.retrieve(&query.question, k).await?;
        if documents.is_empty() {
            warn!("No documents retrieved for query: {}", query.question);
        }

        // Step 2: Assemble context
        debug!("Step 2: Assembling context");
        let context = self.context_assembler.assemble(&documents);

        // Step 3: Generate answer using LLM
        debug!("Step 3: Generating answer with strategy {}", strategy.name);
        let prompt = strategy.build(&context, &query.question);
        let generation = self
            .llm
            .generate(
                &prompt,
                &GenerationParams {
                    temperature,
                    max_tokens,
                },
            )
            .await?;

        // Step 4: Validate answer
        let validation = self.validator.as_ref().map(|validator| {
            debug!("Step 4: Validating answer");
            validator.validate(&generation.text, &context, &query.question)
        });
        if let Some(outcome) = &validation {
            if self.config.logging.verbose && !outcome.is_valid {
                warn!(
                    "Answer failed validation: {} - {}",
                    ValidationReport::summary(outcome),
                    outcome.recommendations.first().map_or("", String::as_str)
                );
            }
        }

        info!("RAG query completed successfully");

        Ok(RagAnswer {
            answer: generation.text,
            query: query.question,
            model: self.llm.model_name().to_string(),
            strategy: strategy.name.to_string(),
            temperature,
            max_tokens,
            num_docs_used: documents.len(),
            k_used: k,
            total_time: started.elapsed().as_secs_f64(),
            generation_time: generation.total_duration.as_secs_f64(),
            timestamp: Utc::now(),
            validation,
            sources: documents,
        })
    }

    /// Retrieve documents, dropping those under the configured similarity floor
    ///
    /// # Errors
    /// - Document retrieval errors
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        let mut documents = self.retriever.retrieve(question, k).await?;
        let min_similarity = self.config.retrieval.min_similarity;
        documents.retain(|doc| doc.similarity >= min_similarity);
        debug!("Retrieved {} documents", documents.len());
        Ok(documents)
    }

    #[must_use]
    pub fn strategy(&self) -> &'static PromptStrategy {
        self.strategy
    }

    #[must_use]
    pub fn validator(&self) -> Option<&ResponseValidator> {
        self.validator.as_ref()
    }

    #[must_use]
    pub fn context_assembler(&self) -> &ContextAssembler {
        &self.context_assembler
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn retriever(&self) -> &dyn Retriever {
        self.retriever.as_ref()
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }
}

/// Per-query overrides; `None` uses the session defaults
#[derive(Debug, Clone, Default)]
pub struct RagQuery {
    pub question: String,
    pub k: Option<usize>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub strategy: Option<PromptType>,
}

impl RagQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }
}

/// RAG answer, serialized as-is by API consumers
#[derive(Debug, Clone, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    pub query: String,
    pub model: String,
    /// Display name of the prompt strategy used
    pub strategy: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub num_docs_used: usize,
    pub k_used: usize,
    /// Wall-clock seconds for the whole pipeline
    pub total_time: f64,
    /// Model-reported generation seconds
    pub generation_time: f64,
    pub timestamp: DateTime<Utc>,
    pub validation: Option<ValidationOutcome>,
    pub sources: Vec<RetrievedDocument>,
}

impl RagAnswer {
    /// Get a formatted string representation
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Pregunta: {}\n\n", self.query));
        output.push_str(&format!("Respuesta:\n{}\n\n", self.answer));
        output.push_str(&format!(
            "Modelo: {} | Estrategia: {} | Temperature: {} | Tiempo: {:.2}s\n",
            self.model, self.strategy, self.temperature, self.total_time
        ));
        output.push_str(&format!("Fuentes ({} fragmentos):\n", self.sources.len()));

        for source in self.sources.iter().take(5) {
            let label = source
                .metadata
                .get("source")
                .map_or("sin fuente", String::as_str);
            output.push_str(&format!(
                "  {}. {} (Similaridad: {:.4})\n",
                source.rank, label, source.similarity
            ));
        }

        if let Some(validation) = &self.validation {
            output.push_str(&format!(
                "Validación: {}\n",
                ValidationReport::summary(validation)
            ));
        }

        output
    }
}
