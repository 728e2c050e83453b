//! Question answering handlers (single question and chat loop)

use std::io::BufRead;

use tracing::debug;

use crate::cli::handlers::build_session;
use crate::cli::output::*;
use crate::prompts;
use crate::rag::RagQuery;
use crate::rag::RagSession;
use crate::validation::ValidationOutcome;
use crate::validation::ValidationReport;
use crate::AppConfig;
use crate::Result;

const EXIT_WORDS: [&str; 3] = ["salir", "exit", "quit"];
const REPORT_WORD: &str = "reporte";

pub struct AskOptions {
    pub k: Option<usize>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub strategy: Option<String>,
    pub report: bool,
    pub json: bool,
}

pub async fn handle_ask(config: &AppConfig, question: String, options: AskOptions) -> Result<()> {
    let session = build_session(config)?;

    let strategy = options
        .strategy
        .as_deref()
        .map(|name| prompts::get_by_name(name).kind);

    if !options.json {
        print_info(&format!("🤖 Pregunta: \"{question}\""));
    }

    let answer = session
        .query_with_options(RagQuery {
            question,
            k: options.k,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            strategy,
        })
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        if config.logging.verbose {
            println!();
            println!(
                "🔍 {}",
                session.context_assembler().create_summary(&answer.sources)
            );
        }
        print_answer(&answer, options.report);
    }

    Ok(())
}

/// Retrieval only: list the fragments a question would use, without calling the model
pub async fn handle_search(config: &AppConfig, question: &str, k: Option<usize>) -> Result<()> {
    let session = build_session(config)?;
    let k = k.unwrap_or(config.default_k());

    print_info(&format!("🔍 Búsqueda: \"{question}\" (k = {k})"));
    let documents = session.retrieve(question, k).await?;

    println!("{}", session.context_assembler().create_summary(&documents));
    print_sources(&documents);
    Ok(())
}

pub async fn handle_chat(config: &AppConfig) -> Result<()> {
    let session = build_session(config)?;
    print_chat_banner(&session);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_validation: Option<ValidationOutcome> = None;

    loop {
        print_prompt("\n❓ Pregunta: ")?;
        let Some(line) = lines.next() else {
            break;
        };
        let question = line?;
        let question = question.trim();

        if question.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&question.to_lowercase().as_str()) {
            break;
        }
        if question.eq_ignore_ascii_case(REPORT_WORD) {
            match &last_validation {
                Some(outcome) => println!("{}", ValidationReport::format(outcome)),
                None => print_info("Todavía no hay una respuesta validada"),
            }
            continue;
        }

        match session.query(question).await {
            Ok(answer) => {
                print_answer(&answer, false);
                last_validation = answer.validation;
            }
            Err(e) => {
                debug!("Chat query failed: {:?}", e);
                print_error(&format!("Error al procesar la pregunta: {e}"));
            }
        }
    }

    print_success("¡Hasta luego!");
    Ok(())
}

fn print_chat_banner(session: &RagSession) {
    println!("{}", "=".repeat(60));
    println!("🐄 Asistente BPG - modo interactivo");
    println!("{}", "=".repeat(60));
    println!(
        "Modelo: {} | Estrategia: {} | Documentos: {}",
        session.model_name(),
        session.strategy().name,
        session.retriever().document_count()
    );
    println!(
        "Validación: {}",
        if session.validator().is_some() {
            "activada"
        } else {
            "desactivada"
        }
    );
    println!("Escribe 'salir' para terminar o '{REPORT_WORD}' para ver la última validación.");
}
