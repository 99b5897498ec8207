// file: src/engine/index.rs
// description: full-rebuild index builder producing immutable tf-idf snapshots
// reference: vector space model, document frequency statistics

use crate::config::IndexConfig;
use crate::engine::chunker::Chunker;
use crate::engine::tokenizer::tokenize;
use crate::engine::weighting::{self, WeightVector};
use crate::error::Result;
use crate::models::{Document, Passage};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A passage together with its precomputed weight vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedPassage {
    pub passage: Passage,
    pub vector: WeightVector,
}

/// One fully built index generation. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    generation: u64,
    passages: Vec<IndexedPassage>,
    document_frequency: HashMap<String, usize>,
    document_count: usize,
    built_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub generation: u64,
    pub documents: usize,
    pub passages: usize,
    pub distinct_terms: usize,
    pub total_tokens: usize,
    pub built_at: String,
}

impl IndexSnapshot {
    pub fn empty() -> Self {
        Self {
            generation: 0,
            passages: Vec::new(),
            document_frequency: HashMap::new(),
            document_count: 0,
            built_at: Utc::now(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn passages(&self) -> &[IndexedPassage] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Number of distinct passages containing `term`; zero when unseen.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn distinct_terms(&self) -> usize {
        self.document_frequency.len()
    }

    /// Passage count used by idf, at least 1 so an empty snapshot stays
    /// well defined.
    pub fn idf_passage_count(&self) -> usize {
        self.passages.len().max(1)
    }

    pub fn idf(&self, term: &str) -> f64 {
        weighting::idf(self.idf_passage_count(), self.document_frequency(term))
    }

    pub fn passage(&self, id: &str) -> Option<&IndexedPassage> {
        self.passages.iter().find(|p| p.passage.id == id)
    }

    pub fn passages_for_document<'a>(
        &'a self,
        document_id: &'a str,
    ) -> impl Iterator<Item = &'a IndexedPassage> + 'a {
        self.passages
            .iter()
            .filter(move |p| p.passage.document_id == document_id)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            generation: self.generation,
            documents: self.document_count,
            passages: self.passages.len(),
            distinct_terms: self.document_frequency.len(),
            total_tokens: self
                .passages
                .iter()
                .map(|p| p.passage.token_count())
                .sum(),
            built_at: self.built_at.to_rfc3339(),
        }
    }
}

impl Default for IndexSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Turns a document set into a fresh [`IndexSnapshot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexBuilder {
    chunker: Chunker,
}

impl IndexBuilder {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        Ok(Self {
            chunker: Chunker::from_config(config)?,
        })
    }

    pub fn build(&self, documents: &[Document]) -> IndexSnapshot {
        self.build_generation(documents, 0)
    }

    /// Passages follow document order, then chunk order within a document.
    pub fn build_generation(&self, documents: &[Document], generation: u64) -> IndexSnapshot {
        let passages = self.collect_passages(documents);
        let document_frequency = Self::count_document_frequency(&passages);

        let passage_count = passages.len().max(1);
        let passages: Vec<IndexedPassage> = passages
            .into_iter()
            .map(|passage| {
                let vector = WeightVector::from_tokens(&passage.tokens, |term| {
                    let df = document_frequency.get(term).copied().unwrap_or(0);
                    weighting::idf(passage_count, df)
                });
                IndexedPassage { passage, vector }
            })
            .collect();

        debug!(
            "Built index generation {}: {} documents, {} passages, {} distinct terms",
            generation,
            documents.len(),
            passages.len(),
            document_frequency.len()
        );

        IndexSnapshot {
            generation,
            passages,
            document_frequency,
            document_count: documents.len(),
            built_at: Utc::now(),
        }
    }

    fn collect_passages(&self, documents: &[Document]) -> Vec<Passage> {
        let mut passages = Vec::new();
        let mut next_id = 0usize;

        for document in documents {
            let before = passages.len();

            for chunk in self.chunker.chunk(&document.text) {
                let tokens = tokenize(chunk);
                if tokens.is_empty() {
                    continue;
                }

                passages.push(Passage {
                    id: format!("{}#{}", document.id, next_id),
                    document_id: document.id.clone(),
                    title: document.title.clone(),
                    text: chunk.to_string(),
                    tokens,
                });
                next_id += 1;
            }

            if passages.len() == before {
                debug!("Document {} contributed no passages", document.id);
            }
        }

        passages
    }

    fn count_document_frequency(passages: &[Passage]) -> HashMap<String, usize> {
        let mut frequency: HashMap<String, usize> = HashMap::new();
        for passage in passages {
            let distinct: HashSet<&str> = passage.tokens.iter().map(String::as_str).collect();
            for term in distinct {
                *frequency.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        frequency
    }
}
