//! Context assembly from retrieved documents

use crate::rag::RetrievedDocument;

const FRAGMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Assembler for creating the prompt context from retrieved fragments
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    /// Create a new context assembler; the limit is in characters
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    /// Assemble context from retrieved documents, whole fragments only
    #[must_use]
    pub fn assemble(&self, documents: &[RetrievedDocument]) -> String {
        let mut context = String::new();
        let mut total_length = 0;

        for doc in documents {
            let entry = Self::format_fragment(doc);
            let separator_length = if context.is_empty() {
                0
            } else {
                FRAGMENT_SEPARATOR.len()
            };
            let entry_length = separator_length + entry.chars().count();

            if total_length + entry_length > self.max_context_length {
                break;
            }

            if !context.is_empty() {
                context.push_str(FRAGMENT_SEPARATOR);
            }
            context.push_str(&entry);
            total_length += entry_length;
        }

        context
    }

    /// Format a single fragment for context
    fn format_fragment(doc: &RetrievedDocument) -> String {
        format!(
            "Fragmento {} (Similaridad: {:.4}):\n{}",
            doc.rank, doc.similarity, doc.text
        )
    }

    /// Create a summary of the retrieved fragments
    #[must_use]
    pub fn create_summary(&self, documents: &[RetrievedDocument]) -> String {
        if documents.is_empty() {
            return "No se recuperaron documentos.".to_string();
        }

        let mut summary = format!("{} fragmento(s) recuperado(s):\n", documents.len());
        for doc in documents.iter().take(3) {
            let preview: String = doc.text.chars().take(200).collect();
            summary.push_str(&format!(
                "\n  Rank {} - Similaridad: {:.4}\n  {}...\n",
                doc.rank, doc.similarity, preview
            ));
        }
        summary
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(12_000)
    }
}
