//! Information display handlers (strategies, config, health check)

use std::path::Path;

use crate::cli::output::*;
use crate::llm::OllamaClient;
use crate::prompts;
use crate::rag::InMemoryRetriever;
use crate::rag::Retriever;
use crate::AppConfig;
use crate::Result;

pub fn handle_strategies_command(config: &AppConfig) {
    print!("{}", prompts::format_strategies());
    println!();
    print_info(&format!(
        "Estrategia configurada: {}",
        prompts::get_by_name(config.prompt_strategy()).name
    ));
}

pub fn handle_config_command(config: &AppConfig) {
    print_config(config);
}

/// Check the Ollama server, the configured model and the corpus
///
/// Returns `Ok(false)` when any check failed, so the binary can exit non-zero.
pub async fn handle_check_command(config: &AppConfig) -> Result<bool> {
    print_info("🔍 Checking BPG RAG setup...");
    let mut healthy = true;

    let client = OllamaClient::new(&config.llm)?;
    match client.list_models().await {
        Ok(models) => {
            print_success(&format!(
                "Ollama reachable at {} ({} models)",
                client.base_url(),
                models.len()
            ));
            if models.iter().any(|name| name == config.llm_model()) {
                print_success(&format!("Model {} available", config.llm_model()));
            } else {
                healthy = false;
                print_warning(&format!(
                    "Model {} not installed. Run: ollama pull {}",
                    config.llm_model(),
                    config.llm_model()
                ));
            }
        }
        Err(e) => {
            healthy = false;
            print_error(&format!("Ollama not reachable at {}: {e}", client.base_url()));
            println!("   Start it with: ollama serve");
        }
    }

    let corpus_path = config.corpus_path();
    if Path::new(corpus_path).exists() {
        match InMemoryRetriever::from_json_file(corpus_path) {
            Ok(retriever) if retriever.document_count() > 0 => {
                print_success(&format!(
                    "Corpus {} loaded ({} documents)",
                    corpus_path,
                    retriever.document_count()
                ));
            }
            Ok(_) => {
                healthy = false;
                print_warning(&format!("Corpus {corpus_path} is empty"));
            }
            Err(e) => {
                healthy = false;
                print_error(&format!("Corpus {corpus_path} could not be loaded: {e}"));
            }
        }
    } else {
        healthy = false;
        print_error(&format!("Corpus {corpus_path} not found"));
    }

    if healthy {
        println!("\n🎉 Setup check completed successfully!");
    }
    Ok(healthy)
}
