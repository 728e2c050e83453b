use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bpgrag::llm::Generation;
use bpgrag::llm::GenerationParams;
use bpgrag::llm::LanguageModel;
use bpgrag::prompts::PromptType;
use bpgrag::rag::Document;
use bpgrag::rag::InMemoryRetriever;
use bpgrag::rag::RagQuery;
use bpgrag::rag::RetrievedDocument;
use bpgrag::rag::Retriever;
use bpgrag::AppConfig;
use bpgrag::BpgRagError;
use bpgrag::RagSession;
use bpgrag::Result;

const ANSWER: &str = "La rampa de carga debe tener:\n• Pendiente máxima de 20 grados\n• Piso antideslizante con listones\n• Laterales cerrados para los animales";

/// Records every call and answers with a fixed text
struct RecordingModel {
    reply: String,
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl RecordingModel {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn last_call(&self) -> (String, GenerationParams) {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LanguageModel for RecordingModel {
    fn model_name(&self) -> &str {
        "test-model"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Generation> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *params));
        Ok(Generation {
            text: self.reply.clone(),
            total_duration: Duration::from_millis(250),
        })
    }
}

struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    fn model_name(&self) -> &str {
        "down"
    }

    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<Generation> {
        Err(BpgRagError::Llm("connection refused".to_string()))
    }
}

/// Returns fixed distances regardless of the query
struct FixedRetriever {
    distances: Vec<f32>,
}

#[async_trait]
impl Retriever for FixedRetriever {
    async fn retrieve(&self, _query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        Ok(self
            .distances
            .iter()
            .take(k)
            .enumerate()
            .map(|(i, distance)| {
                RetrievedDocument::from_distance(
                    i + 1,
                    format!("Fragmento sobre la rampa número {i}"),
                    HashMap::new(),
                    *distance,
                )
            })
            .collect())
    }

    fn document_count(&self) -> usize {
        self.distances.len()
    }
}

fn corpus() -> Arc<InMemoryRetriever> {
    let doc = |id: &str, text: &str| Document {
        id: id.to_string(),
        text: text.to_string(),
        metadata: HashMap::from([("source".to_string(), "manual_bpg.pdf".to_string())]),
    };
    Arc::new(InMemoryRetriever::from_documents(vec![
        doc("1", "La rampa de carga debe tener una pendiente máxima de 20 grados."),
        doc("2", "El piso de la rampa debe ser antideslizante con listones."),
        doc("3", "Los bebederos necesitan agua limpia."),
    ]))
}

#[tokio::test]
async fn test_query_uses_strategy_budget_and_config_temperature() {
    let model = RecordingModel::new(ANSWER);
    let session = RagSession::new(&AppConfig::default(), corpus(), model.clone()).unwrap();

    let answer = session
        .query("¿Qué pendiente debe tener la rampa?")
        .await
        .unwrap();

    let (prompt, params) = model.last_call();
    assert_eq!(params.max_tokens, 500);
    assert!((params.temperature - 0.7).abs() < f32::EPSILON);
    assert!(prompt.contains("Fragmento 1 (Similaridad: "));
    assert!(prompt.contains("¿Qué pendiente debe tener la rampa?"));
    assert!(prompt.contains("REGLAS ESTRICTAS"));

    assert_eq!(answer.answer, ANSWER);
    assert_eq!(answer.model, "test-model");
    assert_eq!(answer.strategy, "Standard");
    assert_eq!(answer.max_tokens, 500);
    assert_eq!(answer.k_used, 5);
    assert_eq!(answer.num_docs_used, 2);
    assert_eq!(answer.sources.len(), 2);
    assert!((answer.generation_time - 0.25).abs() < 1e-9);
    assert!(answer.validation.is_none());
}

#[tokio::test]
async fn test_query_overrides() {
    let model = RecordingModel::new(ANSWER);
    let session = RagSession::new(&AppConfig::default(), corpus(), model.clone()).unwrap();

    let answer = session
        .query_with_options(RagQuery {
            question: "¿Cómo debe ser el piso de la rampa?".to_string(),
            k: Some(1),
            temperature: Some(0.2),
            max_tokens: None,
            strategy: Some(PromptType::Concise),
        })
        .await
        .unwrap();

    let (_, params) = model.last_call();
    assert_eq!(params.max_tokens, 300);
    assert!((params.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(answer.strategy, "Concise");
    assert_eq!(answer.k_used, 1);
    assert_eq!(answer.num_docs_used, 1);

    session
        .query_with_options(RagQuery {
            max_tokens: Some(42),
            ..RagQuery::new("rampa")
        })
        .await
        .unwrap();
    assert_eq!(model.last_call().1.max_tokens, 42);
}

#[tokio::test]
async fn test_configured_strategy_sets_session_default() {
    let mut config = AppConfig::default();
    config.generation.prompt_strategy = "TECHNICAL".to_string();
    let model = RecordingModel::new(ANSWER);
    let session = RagSession::new(&config, corpus(), model.clone()).unwrap();

    assert_eq!(session.strategy().kind, PromptType::Technical);
    session.query("rampa").await.unwrap();
    assert_eq!(model.last_call().1.max_tokens, 700);
}

#[tokio::test]
async fn test_validation_present_only_when_enabled() {
    let mut config = AppConfig::default();
    config.validation.enabled = true;
    config.validation.strict_mode = true;

    let session = RagSession::new(&config, corpus(), RecordingModel::new(ANSWER)).unwrap();
    assert!(session.validator().is_some());

    let answer = session.query("¿Qué pendiente debe tener la rampa?").await.unwrap();
    let validation = answer.validation.expect("validation enabled");
    assert_eq!(validation.checks.len(), 12);

    let disabled = RagSession::new(&AppConfig::default(), corpus(), RecordingModel::new(ANSWER))
        .unwrap();
    assert!(disabled.validator().is_none());
    let answer = disabled.query("rampa").await.unwrap();
    assert!(answer.validation.is_none());
}

#[tokio::test]
async fn test_min_similarity_filters_sources() {
    let mut config = AppConfig::default();
    config.retrieval.min_similarity = 0.5;

    // Similarities 1.0, 0.5, 0.3333, 0.25
    let retriever = Arc::new(FixedRetriever {
        distances: vec![0.0, 1.0, 2.0, 3.0],
    });
    let session = RagSession::new(&config, retriever, RecordingModel::new(ANSWER)).unwrap();

    let answer = session.query("rampa").await.unwrap();
    assert_eq!(answer.num_docs_used, 2);
    assert!(answer.sources.iter().all(|doc| doc.similarity >= 0.5));
}

#[tokio::test]
async fn test_retrieve_and_summarize_without_generation() {
    let model = RecordingModel::new(ANSWER);
    let session = RagSession::new(&AppConfig::default(), corpus(), model.clone()).unwrap();

    let documents = session.retrieve("¿Cómo debe ser el piso de la rampa?", 5).await.unwrap();
    let summary = session.context_assembler().create_summary(&documents);

    assert_eq!(documents.len(), 2);
    assert!(summary.starts_with("2 fragmento(s) recuperado(s):"));
    assert!(summary.contains("Rank 1 - Similaridad: 0.5000"));
    assert!(model.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_no_documents_still_generates() {
    let model = RecordingModel::new("No encuentro esa información específica en los manuales BPG que tengo disponibles.");
    let session = RagSession::new(&AppConfig::default(), corpus(), model.clone()).unwrap();

    let answer = session.query("vacunación aftosa").await.unwrap();
    assert_eq!(answer.num_docs_used, 0);
    assert!(model.last_call().0.contains("vacunación aftosa"));
}

#[tokio::test]
async fn test_llm_error_propagates() {
    let session = RagSession::new(&AppConfig::default(), corpus(), Arc::new(FailingModel)).unwrap();

    let result = session.query("rampa").await;
    assert!(matches!(result, Err(BpgRagError::Llm(_))));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = AppConfig::default();
    config.generation.default_temperature = 1.5;

    let result = RagSession::new(&config, corpus(), RecordingModel::new(ANSWER));
    assert!(matches!(result, Err(BpgRagError::Config(_))));
}

#[tokio::test]
async fn test_answer_serializes_with_validation_shape() {
    let mut config = AppConfig::default();
    config.validation.enabled = true;
    let session = RagSession::new(&config, corpus(), RecordingModel::new(ANSWER)).unwrap();

    let answer = session.query("¿Qué pendiente debe tener la rampa?").await.unwrap();
    let value = serde_json::to_value(&answer).unwrap();

    assert_eq!(value["model"], "test-model");
    assert_eq!(value["strategy"], "Standard");
    assert!(value["timestamp"].is_string());
    assert!(value["validation"]["validations"]["length_ok"].is_boolean());
    assert!(value["validation"]["score"].is_number());
    assert_eq!(value["sources"][0]["rank"], 1);
    assert!(answer.format().contains("Respuesta:"));
}

#[tokio::test]
async fn test_session_shared_across_tasks() {
    let session = Arc::new(
        RagSession::new(&AppConfig::default(), corpus(), RecordingModel::new(ANSWER)).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.query("rampa").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
}
