// file: src/models/passage.rs
// description: indexed passage derived from one window of a source document

use serde::Serialize;

/// One chunk of a document, the unit of indexing and retrieval.
///
/// `tokens` is never empty and `text` is a trimmed, non-empty substring of
/// the source document's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passage {
    pub id: String,
    pub document_id: String,
    pub title: String,
    pub text: String,
    pub tokens: Vec<String>,
}

impl Passage {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
