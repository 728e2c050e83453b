//! Response quality validation
//!
//! Scores a generated answer against the retrieved context and the original
//! question without calling a language model. The validator runs a fixed
//! battery of boolean checks, scores the fraction that passed and turns each
//! failure into a recommendation.
//!
//! # Examples
//!
//! ```rust
//! use bpgrag::validation::ResponseValidator;
//!
//! let validator = ResponseValidator::default();
//! let outcome = validator.validate("Sí, es correcto.", "...", "¿Está bien esto?");
//!
//! assert!(!outcome.is_valid);
//! assert_eq!(outcome.checks.len(), 10);
//! ```

pub mod checks;
pub mod report;

use std::fmt;

use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

pub use report::ValidationReport;

use crate::config::AppConfig;

/// Score at or above which an answer is considered valid
pub const DEFAULT_VALIDITY_THRESHOLD: f64 = 0.7;

/// Minimum keyword / vocabulary overlap for the relevance checks
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.3;

const ALL_CHECKS_PASSED: &str = "✅ Respuesta cumple con todos los criterios de calidad";

/// One heuristic check, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    LengthOk,
    HasContent,
    HasStructure,
    NotHallucinating,
    HasFallback,
    NoCodeBlocks,
    ProperSpanish,
    AnswersQuestion,
    NoInstructionsLeaked,
    ContextualRelevance,
    NoVagueLanguage,
    HasSpecifics,
}

impl Check {
    /// Checks run on every answer
    pub const BASE: [Check; 10] = [
        Check::LengthOk,
        Check::HasContent,
        Check::HasStructure,
        Check::NotHallucinating,
        Check::HasFallback,
        Check::NoCodeBlocks,
        Check::ProperSpanish,
        Check::AnswersQuestion,
        Check::NoInstructionsLeaked,
        Check::ContextualRelevance,
    ];

    /// Checks appended in strict mode
    pub const STRICT: [Check; 2] = [Check::NoVagueLanguage, Check::HasSpecifics];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Check::LengthOk => "length_ok",
            Check::HasContent => "has_content",
            Check::HasStructure => "has_structure",
            Check::NotHallucinating => "not_hallucinating",
            Check::HasFallback => "has_fallback",
            Check::NoCodeBlocks => "no_code_blocks",
            Check::ProperSpanish => "proper_spanish",
            Check::AnswersQuestion => "answers_question",
            Check::NoInstructionsLeaked => "no_instructions_leaked",
            Check::ContextualRelevance => "contextual_relevance",
            Check::NoVagueLanguage => "no_vague_language",
            Check::HasSpecifics => "has_specifics",
        }
    }

    /// Recommendation emitted when this check fails
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Check::LengthOk => "Ajustar longitud de respuesta (muy corta o muy larga)",
            Check::HasContent => "Respuesta vacía o con contenido insuficiente",
            Check::HasStructure => "Mejorar estructura: usar viñetas o párrafos",
            Check::NotHallucinating => "⚠️ CRÍTICO: Posible alucinación detectada",
            Check::HasFallback => {
                "Revisar mensaje de fallback: debe ser breve, o la respuesta carece de sustancia"
            }
            Check::NoCodeBlocks => "Remover bloques de código markdown",
            Check::ProperSpanish => "Verificar que la respuesta esté en español",
            Check::AnswersQuestion => "Respuesta no parece relacionada con la pregunta",
            Check::NoInstructionsLeaked => {
                "🚨 CRÍTICO: El LLM está repitiendo las instrucciones del prompt. Revisar diseño del prompt."
            }
            Check::ContextualRelevance => {
                "⚠️ IMPORTANTE: La respuesta parece no usar el contexto proporcionado. Posible alucinación."
            }
            Check::NoVagueLanguage => "Evitar lenguaje vago, ser más específico",
            Check::HasSpecifics => "Incluir datos específicos (números, medidas)",
        }
    }

    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Check::NotHallucinating | Check::NoInstructionsLeaked)
    }

    /// `no_instructions_leaked` → `No Instructions Leaked`
    #[must_use]
    pub fn humanized(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validator settings, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    pub min_length: usize,
    pub max_length: usize,
    pub strict_mode: bool,
    pub validity_threshold: f64,
    pub keyword_overlap_threshold: f64,
    pub context_overlap_threshold: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_length: 50,
            max_length: 2000,
            strict_mode: false,
            validity_threshold: DEFAULT_VALIDITY_THRESHOLD,
            keyword_overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            context_overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl ValidatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            min_length: config.validation.min_answer_length,
            max_length: config.validation.max_answer_length,
            strict_mode: config.validation.strict_mode,
            ..Self::default()
        }
    }
}

/// Result of validating one answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub score: f64,
    /// Check results in evaluation order
    #[serde(rename = "validations", serialize_with = "serialize_checks")]
    pub checks: Vec<(Check, bool)>,
    pub recommendations: Vec<String>,
}

fn serialize_checks<S: Serializer>(
    checks: &[(Check, bool)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(checks.len()))?;
    for (check, passed) in checks {
        map.serialize_entry(check.as_str(), passed)?;
    }
    map.end()
}

impl ValidationOutcome {
    /// Result of a single check, if it was run
    #[must_use]
    pub fn passed(&self, check: Check) -> Option<bool> {
        self.checks
            .iter()
            .find(|(c, _)| *c == check)
            .map(|(_, passed)| *passed)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = Check> + '_ {
        self.checks
            .iter()
            .filter(|(_, passed)| !passed)
            .map(|(check, _)| *check)
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|(_, passed)| *passed).count()
    }

    #[must_use]
    pub fn has_critical_failure(&self) -> bool {
        self.failed_checks().any(Check::is_critical)
    }
}

/// Heuristic validator for generated answers
///
/// Holds only configuration; `validate` is pure and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    config: ValidatorConfig,
}

impl ResponseValidator {
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Shorthand for the three settings callers usually change
    #[must_use]
    pub fn with_limits(min_length: usize, max_length: usize, strict_mode: bool) -> Self {
        Self::new(ValidatorConfig {
            min_length,
            max_length,
            strict_mode,
            ..ValidatorConfig::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `response` against the `context` it was generated from and the user's `query`
    #[must_use]
    pub fn validate(&self, response: &str, context: &str, query: &str) -> ValidationOutcome {
        let checks: Vec<(Check, bool)> = self
            .active_checks()
            .map(|check| (check, self.run_check(check, response, context, query)))
            .collect();

        let passed = checks.iter().filter(|(_, passed)| *passed).count();
        let score = round3(passed as f64 / checks.len() as f64);
        let recommendations = recommendations_for(&checks);

        ValidationOutcome {
            is_valid: score >= self.config.validity_threshold,
            score,
            checks,
            recommendations,
        }
    }

    fn active_checks(&self) -> impl Iterator<Item = Check> {
        let strict: &'static [Check] = if self.config.strict_mode {
            &Check::STRICT
        } else {
            &[]
        };
        Check::BASE.into_iter().chain(strict.iter().copied())
    }

    fn run_check(&self, check: Check, response: &str, context: &str, query: &str) -> bool {
        let config = &self.config;
        match check {
            Check::LengthOk => checks::check_length(response, config.min_length, config.max_length),
            Check::HasContent => checks::check_has_content(response),
            Check::HasStructure => checks::check_structure(response),
            Check::NotHallucinating => checks::check_no_hallucination(response),
            Check::HasFallback => checks::check_fallback_message(response, config.min_length),
            Check::NoCodeBlocks => checks::check_no_code_blocks(response),
            Check::ProperSpanish => checks::check_spanish(response),
            Check::AnswersQuestion => {
                checks::check_relevance(response, query, config.keyword_overlap_threshold)
            }
            Check::NoInstructionsLeaked => checks::check_no_instructions_leaked(response),
            Check::ContextualRelevance => {
                checks::check_contextual_relevance(response, context, config.context_overlap_threshold)
            }
            Check::NoVagueLanguage => checks::check_no_vague_language(response),
            Check::HasSpecifics => checks::check_has_specifics(response),
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn recommendations_for(checks: &[(Check, bool)]) -> Vec<String> {
    let mut recommendations: Vec<String> = checks
        .iter()
        .filter(|(_, passed)| !passed)
        .map(|(check, _)| check.recommendation().to_string())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(ALL_CHECKS_PASSED.to_string());
    }

    recommendations
}
