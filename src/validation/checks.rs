//! Individual response heuristics
//!
//! Every detector is a pure function over its string inputs. Phrase lists are
//! matched against lower-cased text unless noted otherwise.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Phrases suggesting the model answers from its own knowledge
pub const HALLUCINATION_PHRASES: [&str; 10] = [
    "según mi conocimiento",
    "basándome en mi experiencia",
    "generalmente se recomienda",
    "es común que",
    "típicamente",
    "en mi opinión",
    "creo que",
    "probablemente",
    "suele ser",
    "normalmente se hace",
];

/// Phrases marking an explicit "nothing found" answer
pub const FALLBACK_PHRASES: [&str; 5] = [
    "no encuentro",
    "no tengo",
    "no hay información",
    "no está en los manuales",
    "no puedo encontrar",
];

/// Fallback phrases that exempt an answer from the context overlap check
pub const CONTEXT_FALLBACK_PHRASES: [&str; 3] = ["no encuentro", "no tengo", "no hay información"];

/// Prompt scaffolding that must never be echoed back (compared upper-cased)
pub const INSTRUCTION_MARKERS: [&str; 10] = [
    "ANÁLISIS PREVIO",
    "FORMATO DE RESPUESTA",
    "REGLAS ESTRICTAS",
    "INSTRUCCIONES:",
    "SI LA INFO NO ESTÁ",
    "ESTRUCTURA IDEAL",
    "respondé solo",
    "máximo 300 palabras",
    "comenzá directo",
    "usá viñetas",
];

pub const VAGUE_PHRASES: [&str; 6] = [
    "puede ser",
    "tal vez",
    "quizás",
    "posiblemente",
    "eventualmente",
    "aproximadamente",
];

/// Common Spanish function words
pub const SPANISH_WORDS: [&str; 8] = ["el", "la", "los", "las", "que", "para", "con", "en"];

pub const STOP_WORDS: [&str; 21] = [
    "el", "la", "los", "las", "un", "una", "de", "en", "y", "a", "para", "con", "por", "que",
    "del", "al", "es", "como", "se", "¿", "?",
];

/// Fallback answers are expected to be short
pub const MAX_FALLBACK_LENGTH: usize = 300;

pub const MIN_CONTENT_TOKENS: usize = 10;

lazy_static! {
    static ref SIGNIFICANT_WORD: Regex = Regex::new(r"\b\w{5,}\b").expect("valid word regex");
    static ref NUMBER: Regex = Regex::new(r"\d+").expect("valid number regex");
    static ref NUMBER_WITH_UNIT: Regex =
        Regex::new(r"\d+\s*(°|m|cm|kg|%|grados|metros|centímetros)").expect("valid unit regex");
    static ref STOP_WORD_SET: HashSet<&'static str> = STOP_WORDS.into_iter().collect();
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| haystack.contains(phrase))
}

pub fn check_length(response: &str, min_length: usize, max_length: usize) -> bool {
    let length = char_len(response.trim());
    (min_length..=max_length).contains(&length)
}

pub fn check_has_content(response: &str) -> bool {
    !response.trim().is_empty() && response.split_whitespace().count() >= MIN_CONTENT_TOKENS
}

pub fn check_structure(response: &str) -> bool {
    response.contains('•')
        || response.contains("\n-")
        || response.contains("\n*")
        || response.matches('\n').count() >= 2
        || response.contains(':')
}

pub fn check_no_hallucination(response: &str) -> bool {
    !contains_any(&response.to_lowercase(), &HALLUCINATION_PHRASES)
}

pub fn is_fallback(response: &str) -> bool {
    contains_any(&response.to_lowercase(), &FALLBACK_PHRASES)
}

/// A fallback must be brief; anything else must exceed `min_length`
pub fn check_fallback_message(response: &str, min_length: usize) -> bool {
    if is_fallback(response) {
        char_len(response) < MAX_FALLBACK_LENGTH
    } else {
        char_len(response) > min_length
    }
}

pub fn check_no_code_blocks(response: &str) -> bool {
    !response.contains("```")
}

/// Weak signal: any function word anywhere in the text, substrings included
pub fn check_spanish(response: &str) -> bool {
    contains_any(&response.to_lowercase(), &SPANISH_WORDS)
}

/// Share of the query's keywords that also appear in the response
pub fn keyword_overlap(response: &str, query: &str) -> Option<f64> {
    let query_lower = query.to_lowercase();
    let query_keywords: HashSet<&str> = query_lower
        .split_whitespace()
        .filter(|word| !STOP_WORD_SET.contains(word))
        .collect();

    if query_keywords.is_empty() {
        return None;
    }

    let response_lower = response.to_lowercase();
    let response_words: HashSet<&str> = response_lower.split_whitespace().collect();
    let overlap = query_keywords.intersection(&response_words).count();

    Some(overlap as f64 / query_keywords.len() as f64)
}

pub fn check_relevance(response: &str, query: &str, threshold: f64) -> bool {
    keyword_overlap(response, query).map_or(true, |ratio| ratio >= threshold)
}

pub fn check_no_instructions_leaked(response: &str) -> bool {
    let response_upper = response.to_uppercase();
    !INSTRUCTION_MARKERS
        .iter()
        .any(|marker| response_upper.contains(&marker.to_uppercase()))
}

fn significant_words(text: &str) -> HashSet<String> {
    SIGNIFICANT_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Share of the response's significant words that also occur in the context
pub fn context_overlap(response: &str, context: &str) -> Option<f64> {
    let response_words = significant_words(response);
    if response_words.is_empty() {
        return None;
    }

    let context_words = significant_words(context);
    let overlap = response_words.intersection(&context_words).count();

    Some(overlap as f64 / response_words.len() as f64)
}

pub fn check_contextual_relevance(response: &str, context: &str, threshold: f64) -> bool {
    if contains_any(&response.to_lowercase(), &CONTEXT_FALLBACK_PHRASES) {
        return true;
    }

    context_overlap(response, context).is_some_and(|ratio| ratio >= threshold)
}

pub fn check_no_vague_language(response: &str) -> bool {
    !contains_any(&response.to_lowercase(), &VAGUE_PHRASES)
}

pub fn check_has_specifics(response: &str) -> bool {
    NUMBER.is_match(response) || NUMBER_WITH_UNIT.is_match(response)
}
