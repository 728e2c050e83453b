use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::prompts::PromptType;
use crate::BpgRagError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    pub model: String,
    /// Request timeout for generation calls, in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// JSON corpus loaded by the local retriever
    pub corpus_path: String,
    pub collection_name: String,
    pub default_k: usize,
    /// Documents below this similarity (0-1) are dropped before generation
    pub min_similarity: f32,
    /// Upper bound for the assembled context, in characters
    pub max_context_length: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            corpus_path: "data/corpus.json".to_string(),
            collection_name: "bpg_manuals".to_string(),
            default_k: 5,
            min_similarity: 0.0,
            max_context_length: 12_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub default_temperature: f32,
    /// One of `standard`, `concise`, `fewshot`, `technical` (case-insensitive)
    pub prompt_strategy: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_temperature: 0.7,
            prompt_strategy: "standard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub enabled: bool,
    pub min_answer_length: usize,
    pub max_answer_length: usize,
    pub strict_mode: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_answer_length: 50,
            max_answer_length: 2000,
            strict_mode: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log a warning with the score whenever an answer fails validation
    pub verbose: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

/// Names accepted by [`AppConfig::preset`]
pub const PRESET_NAMES: [&str; 4] = ["default", "dev", "fast", "technical"];

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(BpgRagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Built-in configuration presets; unknown names resolve to `default`
    pub fn preset(name: &str) -> Self {
        let mut config = Self::default();
        match name.trim().to_lowercase().as_str() {
            "dev" => {
                config.validation.enabled = true;
                config.logging.verbose = true;
                config.logging.level = "debug".to_string();
            }
            "fast" => {
                config.retrieval.default_k = 3;
                config.generation.prompt_strategy = "concise".to_string();
                config.llm.timeout_secs = 60;
            }
            "technical" => {
                config.retrieval.default_k = 7;
                config.generation.prompt_strategy = "technical".to_string();
                config.generation.default_temperature = 0.3;
            }
            _ => {}
        }
        config
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> crate::Result<()> {
        let temperature = self.generation.default_temperature;
        if !(0.0..=1.0).contains(&temperature) {
            return Err(BpgRagError::Config(format!(
                "default_temperature must be between 0 and 1, got {temperature}"
            )));
        }

        let min_similarity = self.retrieval.min_similarity;
        if !(0.0..=1.0).contains(&min_similarity) {
            return Err(BpgRagError::Config(format!(
                "min_similarity must be between 0 and 1, got {min_similarity}"
            )));
        }

        if self.retrieval.default_k < 1 {
            return Err(BpgRagError::Config(
                "default_k must be at least 1".to_string(),
            ));
        }

        if self.validation.min_answer_length > self.validation.max_answer_length {
            return Err(BpgRagError::Config(format!(
                "min_answer_length ({}) exceeds max_answer_length ({})",
                self.validation.min_answer_length, self.validation.max_answer_length
            )));
        }

        Ok(())
    }

    /// Get Ollama base URL
    pub fn llm_base_url(&self) -> &str {
        &self.llm.base_url
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.model
    }

    /// Get default number of documents to retrieve
    pub fn default_k(&self) -> usize {
        self.retrieval.default_k
    }

    /// Get minimum similarity for retrieved documents
    pub fn min_similarity(&self) -> f32 {
        self.retrieval.min_similarity
    }

    /// Get corpus path
    pub fn corpus_path(&self) -> &str {
        &self.retrieval.corpus_path
    }

    /// Get default sampling temperature
    pub fn default_temperature(&self) -> f32 {
        self.generation.default_temperature
    }

    /// Get configured prompt strategy name, as written
    pub fn prompt_strategy(&self) -> &str {
        &self.generation.prompt_strategy
    }

    /// Resolve the configured prompt strategy (unknown names fall back to Standard)
    pub fn prompt_type(&self) -> PromptType {
        crate::prompts::get_by_name(&self.generation.prompt_strategy).kind
    }

    /// Check if answer validation is enabled
    pub fn validation_enabled(&self) -> bool {
        self.validation.enabled
    }
}
