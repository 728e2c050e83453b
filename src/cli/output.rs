//! Output formatting and display functions

use crate::config::AppConfig;
use crate::rag::RagAnswer;
use crate::rag::RetrievedDocument;
use crate::validation::ValidationOutcome;
use crate::validation::ValidationReport;

/// Truncate a string to a maximum number of characters (UTF-8 safe)
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print a RAG answer with its sources
pub fn print_answer(answer: &RagAnswer, show_report: bool) {
    println!();
    println!("📝 Respuesta:");
    println!("{}", answer.answer);
    println!();
    println!(
        "🤖 {} | estrategia {} | temperature {} | max_tokens {} | {:.2}s",
        answer.model, answer.strategy, answer.temperature, answer.max_tokens, answer.total_time
    );

    print_sources(&answer.sources);

    if let Some(validation) = &answer.validation {
        println!();
        if show_report {
            println!("{}", ValidationReport::format(validation));
        } else {
            print_validation_summary(validation);
        }
    }
}

/// Print retrieved fragments, one line each
pub fn print_sources(sources: &[RetrievedDocument]) {
    if sources.is_empty() {
        print_warning("No se recuperaron fragmentos de los manuales");
        return;
    }

    println!();
    println!("📚 Fuentes ({} fragmentos):", sources.len());
    for source in sources {
        let label = source
            .metadata
            .get("source")
            .map_or("sin fuente", String::as_str);
        println!(
            "  {}. {} (similaridad {:.4}) {}",
            source.rank,
            label,
            source.similarity,
            truncate_str(&source.text.replace('\n', " "), 60)
        );
    }
}

/// Print the one-line validation summary plus the first recommendation
pub fn print_validation_summary(outcome: &ValidationOutcome) {
    let line = format!("Validación: {}", ValidationReport::summary(outcome));
    if outcome.is_valid {
        print_success(&line);
    } else {
        print_warning(&line);
        if let Some(first) = outcome.recommendations.first() {
            println!("   {first}");
        }
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 BPG RAG Configuration:");
    println!();

    println!("🤖 LLM:");
    println!("  Base URL: {}", config.llm_base_url());
    println!("  Model: {}", config.llm_model());
    println!("  Timeout: {}s", config.llm.timeout_secs);
    println!();

    println!("🔍 Retrieval:");
    println!("  Corpus: {}", config.corpus_path());
    println!("  Collection: {}", config.retrieval.collection_name);
    println!("  Default k: {}", config.default_k());
    println!("  Min similarity: {}", config.min_similarity());
    println!("  Max context length: {} chars", config.retrieval.max_context_length);
    println!();

    println!("💭 Generation:");
    println!("  Temperature: {}", config.default_temperature());
    println!(
        "  Prompt strategy: {} ({})",
        config.prompt_strategy(),
        config.prompt_type()
    );
    println!();

    println!("✅ Validation:");
    println!("  Enabled: {}", config.validation_enabled());
    println!("  Min answer length: {}", config.validation.min_answer_length);
    println!("  Max answer length: {}", config.validation.max_answer_length);
    println!("  Strict mode: {}", config.validation.strict_mode);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Verbose: {}", config.logging.verbose);
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    println!("❌ {msg}");
}

pub fn print_prompt(msg: &str) -> std::io::Result<()> {
    print!("{msg}");
    std::io::Write::flush(&mut std::io::stdout())
}
