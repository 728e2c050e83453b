//! Local keyword retriever over a JSON corpus

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;
use tracing::info;

use crate::errors::BpgRagError;
use crate::errors::Result;
use crate::rag::Document;
use crate::rag::RetrievedDocument;
use crate::rag::Retriever;
use crate::validation::checks::STOP_WORDS;

const MIN_KEYWORD_CHARS: usize = 3;

/// In-memory retriever ranking documents by shared query keywords
///
/// Distance is the number of query keywords missing from a document; documents
/// sharing no keyword with the query are never returned.
pub struct InMemoryRetriever {
    documents: Vec<Document>,
    /// Keyword set per document, parallel to `documents`
    keywords: Vec<HashSet<String>>,
}

impl InMemoryRetriever {
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let keywords = documents.iter().map(|doc| keywords(&doc.text)).collect();
        Self {
            documents,
            keywords,
        }
    }

    /// Load a JSON array of `{ "id", "text", "metadata" }` objects
    ///
    /// # Errors
    /// - IO errors reading the file
    /// - Malformed corpus JSON
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let documents: Vec<Document> = serde_json::from_str(&content).map_err(|e| {
            BpgRagError::Retrieval(format!(
                "Invalid corpus file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        info!(
            "Loaded {} documents from {}",
            documents.len(),
            path.as_ref().display()
        );
        Ok(Self::from_documents(documents))
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

#[async_trait]
impl Retriever for InMemoryRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        debug!("Performing keyword search: {}", query);

        let query_keywords = keywords(query);
        if query_keywords.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, usize)> = self
            .keywords
            .iter()
            .enumerate()
            .filter_map(|(idx, doc_keywords)| {
                let matched = query_keywords.intersection(doc_keywords).count();
                (matched > 0).then(|| (idx, query_keywords.len() - matched))
            })
            .collect();

        // Stable sort keeps corpus order among equal distances
        scored.sort_by_key(|&(_, missing)| missing);

        let results = scored
            .into_iter()
            .take(k)
            .enumerate()
            .map(|(position, (idx, missing))| {
                let doc = &self.documents[idx];
                RetrievedDocument::from_distance(
                    position + 1,
                    doc.text.clone(),
                    doc.metadata.clone(),
                    missing as f32,
                )
            })
            .collect();

        Ok(results)
    }

    fn document_count(&self) -> usize {
        self.documents.len()
    }
}

fn keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}
