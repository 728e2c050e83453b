use bpgrag::prompts::FALLBACK_ANSWER;
use bpgrag::validation::Check;
use bpgrag::validation::ResponseValidator;
use bpgrag::validation::ValidationReport;
use bpgrag::validation::ValidatorConfig;
use proptest::prelude::*;

const RAMPA_CONTEXT: &str = include_str!("fixtures/rampa_context.txt");
const RAMPA_ANSWER: &str = include_str!("fixtures/rampa_answer.txt");
const RAMPA_QUERY: &str = "¿Qué pendiente debe tener la rampa de carga?";

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[test]
fn test_short_answer_is_invalid() {
    let outcome = ResponseValidator::default().validate("Sí, es correcto.", RAMPA_CONTEXT, RAMPA_QUERY);

    assert_eq!(outcome.passed(Check::LengthOk), Some(false));
    assert!(!outcome.is_valid);
    assert!(outcome
        .recommendations
        .iter()
        .any(|r| r.contains("longitud")));
}

#[test]
fn test_hallucination_phrase_detected() {
    let response = "Según mi conocimiento, la rampa de carga debe tener una pendiente suave \
                    para que los animales suban sin resbalar ni lastimarse.";
    let outcome = ResponseValidator::default().validate(response, RAMPA_CONTEXT, RAMPA_QUERY);

    assert_eq!(outcome.passed(Check::NotHallucinating), Some(false));
    assert!(outcome.has_critical_failure());
    assert!(outcome
        .recommendations
        .iter()
        .any(|r| r.contains("alucinación")));
}

#[test]
fn test_fallback_answer_passes_fallback_check() {
    let outcome = ResponseValidator::default().validate(FALLBACK_ANSWER, RAMPA_CONTEXT, RAMPA_QUERY);

    assert_eq!(outcome.passed(Check::HasFallback), Some(true));
    // A fallback never counts as ignoring the context
    assert_eq!(outcome.passed(Check::ContextualRelevance), Some(true));
}

#[test]
fn test_long_fallback_fails() {
    let response = format!("{FALLBACK_ANSWER} {}", "Lo siento mucho. ".repeat(20));
    let outcome = ResponseValidator::default().validate(&response, RAMPA_CONTEXT, RAMPA_QUERY);

    assert_eq!(outcome.passed(Check::HasFallback), Some(false));
}

#[test]
fn test_instruction_leak_detected() {
    let response = "INSTRUCCIONES: respondé con viñetas.\nLa rampa de carga debe tener una \
                    pendiente máxima de 20 grados y piso antideslizante.";
    let outcome = ResponseValidator::default().validate(response, RAMPA_CONTEXT, RAMPA_QUERY);

    assert_eq!(outcome.passed(Check::NoInstructionsLeaked), Some(false));
    assert!(outcome
        .recommendations
        .iter()
        .any(|r| r.contains("repitiendo las instrucciones del prompt")));
}

#[test]
fn test_well_formed_answer_is_valid() {
    let outcome = ResponseValidator::default().validate(RAMPA_ANSWER, RAMPA_CONTEXT, RAMPA_QUERY);

    assert!(outcome.score > 0.7, "score {}", outcome.score);
    assert!(outcome.is_valid);
    assert_eq!(outcome.passed(Check::ContextualRelevance), Some(true));
    assert_eq!(outcome.passed(Check::AnswersQuestion), Some(true));
    assert_eq!(outcome.recommendations.len(), 1);
}

#[test]
fn test_strict_mode_adds_two_checks() {
    let validator = ResponseValidator::with_limits(50, 2000, true);
    let outcome = validator.validate(RAMPA_ANSWER, RAMPA_CONTEXT, RAMPA_QUERY);

    assert_eq!(outcome.checks.len(), 12);
    assert_eq!(outcome.passed(Check::NoVagueLanguage), Some(true));
    assert_eq!(outcome.passed(Check::HasSpecifics), Some(true));

    let vague = validator.validate(
        "Tal vez la rampa puede ser más baja, quizás con otro piso.",
        RAMPA_CONTEXT,
        RAMPA_QUERY,
    );
    assert_eq!(vague.passed(Check::NoVagueLanguage), Some(false));
    assert_eq!(vague.passed(Check::HasSpecifics), Some(false));
}

#[test]
fn test_checks_follow_evaluation_order() {
    let outcome = ResponseValidator::with_limits(50, 2000, true).validate("x", "", "");
    let names: Vec<&str> = outcome.checks.iter().map(|(c, _)| c.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "length_ok",
            "has_content",
            "has_structure",
            "not_hallucinating",
            "has_fallback",
            "no_code_blocks",
            "proper_spanish",
            "answers_question",
            "no_instructions_leaked",
            "contextual_relevance",
            "no_vague_language",
            "has_specifics",
        ]
    );
}

#[test]
fn test_custom_validity_threshold() {
    let validator = ResponseValidator::new(ValidatorConfig {
        validity_threshold: 1.0,
        ..ValidatorConfig::default()
    });
    let outcome = validator.validate(RAMPA_ANSWER, RAMPA_CONTEXT, RAMPA_QUERY);
    assert_eq!(outcome.is_valid, (outcome.score - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_spanish_detection_accepts_embedded_function_words() {
    let outcome = ResponseValidator::default().validate("shell elements", "", "");
    assert_eq!(outcome.passed(Check::ProperSpanish), Some(true));
}

#[test]
fn test_unrelated_cannot_find_answer_fails_context_check() {
    let outcome = ResponseValidator::default().validate(
        "No puedo encontrar referencias sobre vacunación antiparasitaria obligatoria anual",
        "Bebederos limpios siempre",
        "vacunas",
    );
    assert_eq!(outcome.passed(Check::ContextualRelevance), Some(false));
    // Still recognised as a short fallback
    assert_eq!(outcome.passed(Check::HasFallback), Some(true));
}

#[test]
fn test_json_shape() {
    let outcome = ResponseValidator::default().validate("Sí, es correcto.", RAMPA_CONTEXT, RAMPA_QUERY);
    let json = serde_json::to_string(&outcome).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["is_valid"], false);
    assert_eq!(value["validations"]["length_ok"], false);
    assert_eq!(value["validations"].as_object().unwrap().len(), 10);
    assert!(value["recommendations"].as_array().unwrap().len() > 1);

    // Check entries keep evaluation order in the serialized text
    let first = json.find("\"length_ok\"").unwrap();
    let last = json.find("\"contextual_relevance\"").unwrap();
    assert!(first < last);
}

#[test]
fn test_report_lists_every_check() {
    let outcome = ResponseValidator::default().validate(RAMPA_ANSWER, RAMPA_CONTEXT, RAMPA_QUERY);
    let report = ValidationReport::format(&outcome);

    assert!(report.contains("Score de Calidad"));
    assert!(report.contains("Length Ok"));
    assert!(report.contains("Contextual Relevance"));
    assert_eq!(report.matches("✅ PASS").count(), outcome.passed_count());
}

proptest! {
    #[test]
    fn prop_score_is_exact_fraction(
        response in "\\PC{0,300}",
        context in "\\PC{0,200}",
        query in "\\PC{0,80}",
        strict in any::<bool>(),
    ) {
        let outcome = ResponseValidator::with_limits(50, 2000, strict).validate(&response, &context, &query);

        prop_assert_eq!(outcome.checks.len(), if strict { 12 } else { 10 });
        prop_assert!((0.0..=1.0).contains(&outcome.score));

        let passed = outcome.checks.iter().filter(|(_, p)| *p).count();
        let expected = round3(passed as f64 / outcome.checks.len() as f64);
        prop_assert_eq!(outcome.score, expected);
        prop_assert_eq!(outcome.is_valid, outcome.score >= 0.7);
    }

    #[test]
    fn prop_recommendations_never_empty(
        response in "\\PC{0,300}",
        context in "\\PC{0,200}",
        query in "\\PC{0,80}",
    ) {
        let outcome = ResponseValidator::default().validate(&response, &context, &query);
        let all_passed = outcome.checks.iter().all(|(_, p)| *p);

        prop_assert!(!outcome.recommendations.is_empty());
        if all_passed {
            prop_assert_eq!(outcome.recommendations.len(), 1);
        } else {
            prop_assert_eq!(outcome.recommendations.len(), outcome.failed_checks().count());
        }
    }

    #[test]
    fn prop_validate_is_idempotent(
        response in "\\PC{0,300}",
        context in "\\PC{0,200}",
        query in "\\PC{0,80}",
    ) {
        let validator = ResponseValidator::default();
        let first = validator.validate(&response, &context, &query);
        let second = validator.validate(&response, &context, &query);
        prop_assert_eq!(first, second);
    }
}
