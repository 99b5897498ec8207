// file: src/models/search_result.rs
// description: Owned ranked passage handed to the answer composer
// reference: Used for lexical similarity search results

use crate::models::Passage;
use crate::utils::Validator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based position in the ranking
    pub rank: usize,

    /// Passage identifier, unique within the snapshot that produced it
    pub passage_id: String,

    /// Source document identifier
    pub document_id: String,

    /// Source document title, used for citations
    pub title: String,

    /// Passage text
    pub text: String,

    /// Cosine similarity (higher is more similar, 0.0-1.0)
    pub score: f64,
}

impl SearchResult {
    pub fn from_passage(rank: usize, passage: &Passage, score: f64) -> Self {
        Self {
            rank,
            passage_id: passage.id.clone(),
            document_id: passage.document_id.clone(),
            title: passage.title.clone(),
            text: passage.text.clone(),
            score,
        }
    }

    /// Short source label, falls back to the document id when untitled.
    pub fn citation(&self) -> String {
        if self.title.trim().is_empty() {
            format!("[{}] {}", self.rank, self.document_id)
        } else {
            format!("[{}] {}", self.rank, self.title)
        }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        format!(
            "Score: {:.4} | {} ({})\n{}\n",
            self.score,
            self.citation(),
            self.passage_id,
            Validator::truncate_text(&self.text, max_content_len)
        )
    }
}
