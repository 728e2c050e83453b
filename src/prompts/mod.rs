//! Prompt strategies for RAG queries
//!
//! A strategy turns retrieved context and the producer's question into the
//! text sent to the language model. The four variants differ in scaffolding
//! and in the generation budget they recommend:
//!
//! | Strategy  | Tokens | Focus                                   |
//! |-----------|--------|-----------------------------------------|
//! | Standard  | 500    | full instructions and strict rules      |
//! | Concise   | 300    | minimal scaffolding, short answers      |
//! | FewShot   | 600    | worked question/answer examples         |
//! | Technical | 700    | regulations and exact technical values  |
//!
//! Lookup by name never fails: unknown names resolve to Standard.

pub mod templates;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

pub use templates::FALLBACK_ANSWER;

/// Closed set of prompt strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    Standard,
    Concise,
    FewShot,
    Technical,
}

impl PromptType {
    pub const ALL: [PromptType; 4] = [
        PromptType::Standard,
        PromptType::Concise,
        PromptType::FewShot,
        PromptType::Technical,
    ];

    /// Canonical lower-case identifier used in configuration files
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            PromptType::Standard => "standard",
            PromptType::Concise => "concise",
            PromptType::FewShot => "fewshot",
            PromptType::Technical => "technical",
        }
    }

    /// Exact (case-insensitive) identifier match, without fallback
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.identifier().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Static descriptor for one prompt strategy
#[derive(Debug, PartialEq, Eq)]
pub struct PromptStrategy {
    pub kind: PromptType,
    /// Display name, unique across strategies
    pub name: &'static str,
    pub description: &'static str,
    pub max_tokens_recommended: usize,
}

impl PromptStrategy {
    /// Build the prompt for `context` and `query`
    ///
    /// Total over all inputs: the result always contains both strings verbatim.
    #[must_use]
    pub fn build(&self, context: &str, query: &str) -> String {
        match self.kind {
            PromptType::Standard => templates::build_standard_prompt(context, query),
            PromptType::Concise => templates::build_concise_prompt(context, query),
            PromptType::FewShot => templates::build_fewshot_prompt(context, query),
            PromptType::Technical => templates::build_technical_prompt(context, query),
        }
    }

    #[must_use]
    pub const fn identifier(&self) -> &'static str {
        self.kind.identifier()
    }
}

static STANDARD: PromptStrategy = PromptStrategy {
    kind: PromptType::Standard,
    name: "Standard",
    description: "Instrucciones completas y reglas estrictas (balanceado)",
    max_tokens_recommended: 500,
};

static CONCISE: PromptStrategy = PromptStrategy {
    kind: PromptType::Concise,
    name: "Concise",
    description: "Respuestas breves y directas",
    max_tokens_recommended: 300,
};

static FEWSHOT: PromptStrategy = PromptStrategy {
    kind: PromptType::FewShot,
    name: "FewShot",
    description: "Incluye ejemplos de preguntas y respuestas",
    max_tokens_recommended: 600,
};

static TECHNICAL: PromptStrategy = PromptStrategy {
    kind: PromptType::Technical,
    name: "Technical",
    description: "Enfoque técnico con citas de normativas",
    max_tokens_recommended: 700,
};

/// Get the strategy for a known type
#[must_use]
pub fn get_by_type(kind: PromptType) -> &'static PromptStrategy {
    match kind {
        PromptType::Standard => &STANDARD,
        PromptType::Concise => &CONCISE,
        PromptType::FewShot => &FEWSHOT,
        PromptType::Technical => &TECHNICAL,
    }
}

/// Case-insensitive lookup by identifier; unknown names fall back to Standard
#[must_use]
pub fn get_by_name(name: &str) -> &'static PromptStrategy {
    match PromptType::parse(name) {
        Some(kind) => get_by_type(kind),
        None => {
            debug!("Unknown prompt strategy '{}', using Standard", name);
            &STANDARD
        }
    }
}

/// Identifier and one-line description of every strategy, in stable order
#[must_use]
pub fn list() -> Vec<(&'static str, &'static str)> {
    PromptType::ALL
        .into_iter()
        .map(|kind| {
            let strategy = get_by_type(kind);
            (strategy.identifier(), strategy.description)
        })
        .collect()
}

/// Human-readable listing for terminal output
#[must_use]
pub fn format_strategies() -> String {
    let mut output = String::from("Available prompt strategies:\n");
    for kind in PromptType::ALL {
        let strategy = get_by_type(kind);
        output.push_str(&format!(
            "  • {:<10} {:<10} {:>4} tokens  {}\n",
            strategy.identifier(),
            strategy.name,
            strategy.max_tokens_recommended,
            strategy.description
        ));
    }
    output
}
