// file: src/engine/mod.rs
// description: lexical retrieval engine module exports and knowledge base facade
// reference: chunk -> tokenize -> weigh -> rank pipeline

pub mod chunker;
pub mod index;
pub mod query;
pub mod store;
pub mod tokenizer;
pub mod weighting;

pub use chunker::Chunker;
pub use index::{IndexBuilder, IndexSnapshot, IndexStats, IndexedPassage};
pub use query::{DEFAULT_TOP_K, ScoredPassage};
pub use store::SnapshotStore;
pub use tokenizer::tokenize;
pub use weighting::WeightVector;

use crate::config::{Config, IndexConfig, QueryConfig};
use crate::error::Result;
use crate::models::{Document, SearchResult};
use crate::utils::OperationTimer;
use std::sync::Arc;

/// Builder, publish point and query defaults bundled for a host.
///
/// `rebuild` and `search` may be called from different threads.
#[derive(Debug)]
pub struct KnowledgeBase {
    builder: IndexBuilder,
    store: SnapshotStore,
    query: QueryConfig,
}

impl KnowledgeBase {
    pub fn new(index: &IndexConfig, query: QueryConfig) -> Result<Self> {
        Ok(Self {
            builder: IndexBuilder::new(index)?,
            store: SnapshotStore::new(),
            query,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.index, config.query.clone())
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query
    }

    pub fn rebuild(&self, documents: &[Document]) -> Arc<IndexSnapshot> {
        let timer = OperationTimer::new("index rebuild");
        let snapshot = self.store.rebuild(&self.builder, documents);
        timer.finish_with_count(snapshot.len(), "passages");
        snapshot
    }

    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.store.current()
    }

    /// Ranked results using the configured `top_k` and `min_score`.
    pub fn search(&self, text: &str) -> Vec<SearchResult> {
        self.search_top(text, self.query.top_k)
    }

    pub fn search_top(&self, text: &str, k: usize) -> Vec<SearchResult> {
        self.store.current().search(text, k, self.query.min_score)
    }
}
