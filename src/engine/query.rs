// file: src/engine/query.rs
// description: cosine-similarity ranking of snapshot passages against a free-text query
// reference: vector space model, linear scan over precomputed vectors

use crate::engine::index::IndexSnapshot;
use crate::engine::tokenizer::tokenize;
use crate::engine::weighting::WeightVector;
use crate::models::{Passage, SearchResult};
use std::cmp::Ordering;
use tracing::debug;

pub const DEFAULT_TOP_K: usize = 4;

/// A borrowed passage and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPassage<'a> {
    pub passage: &'a Passage,
    pub score: f64,
}

impl ScoredPassage<'_> {
    pub fn to_result(&self, rank: usize) -> SearchResult {
        SearchResult::from_passage(rank, self.passage, self.score)
    }
}

impl IndexSnapshot {
    /// Weighs `text` against this snapshot's document frequencies without
    /// altering them.
    pub fn query_vector(&self, text: &str) -> WeightVector {
        let tokens = tokenize(text);
        WeightVector::from_tokens(&tokens, |term| self.idf(term))
    }

    /// Top `k` passages by cosine similarity, best first.
    ///
    /// Passages sharing no term with the query are left out, so an empty
    /// snapshot, an empty query or a query of unseen terms all give an empty
    /// result.
    pub fn query(&self, text: &str, k: usize) -> Vec<ScoredPassage<'_>> {
        self.query_with_threshold(text, k, 0.0)
    }

    /// Like [`IndexSnapshot::query`], keeping only scores above `min_score`.
    pub fn query_with_threshold(
        &self,
        text: &str,
        k: usize,
        min_score: f64,
    ) -> Vec<ScoredPassage<'_>> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }

        let query = self.query_vector(text);
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredPassage<'_>> = self
            .passages()
            .iter()
            .map(|indexed| ScoredPassage {
                passage: &indexed.passage,
                score: query.cosine(&indexed.vector),
            })
            .filter(|hit| hit.score > min_score)
            .collect();

        // stable: equal scores keep passage order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(
            "Query matched {} passages in generation {} ({} query terms)",
            scored.len(),
            self.generation(),
            query.len()
        );

        scored
    }

    /// Owned, ranked results for the answer composer.
    pub fn search(&self, text: &str, k: usize, min_score: f64) -> Vec<SearchResult> {
        self.query_with_threshold(text, k, min_score)
            .iter()
            .enumerate()
            .map(|(i, hit)| hit.to_result(i + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::engine::index::IndexBuilder;
    use crate::models::Document;
    use pretty_assertions::assert_eq;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new(
                "sched",
                "Scheduling",
                "Round robin scheduling assigns a fixed quantum to each runnable process.",
            ),
            Document::new(
                "memory",
                "Memory",
                "Paging splits memory into frames and the page table maps each page.",
            ),
            Document::new(
                "sync",
                "Synchronization",
                "A mutex protects a critical section; a semaphore counts permits for each process.",
            ),
            Document::new(
                "fs",
                "File systems",
                "Inodes store file metadata while directories map names to inodes.",
            ),
            Document::new(
                "net",
                "Networking",
                "TCP retransmits lost segments and uses a sliding window for flow control.",
            ),
        ]
    }

    #[test]
    fn test_scenario_single_document() {
        let snapshot = IndexBuilder::default().build(&[Document::new("d1", "", "alpha beta alpha")]);

        let hits = snapshot.query("alpha", DEFAULT_TOP_K);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].passage.document_id, "d1");
        assert!(hits[0].score > 0.0);

        assert!(snapshot.query("gamma", DEFAULT_TOP_K).is_empty());
        assert!(snapshot.query_vector("gamma").norm().is_finite());
        assert!(snapshot.query_vector("gamma").weight("gamma").is_finite());
    }

    #[test]
    fn test_empty_query_and_empty_corpus() {
        let snapshot = IndexBuilder::default().build(&corpus());
        assert!(snapshot.query("", 4).is_empty());
        assert!(snapshot.query("  ?!  ", 4).is_empty());

        let empty = IndexBuilder::default().build(&[]);
        assert!(empty.query("anything", 4).is_empty());
    }

    #[test]
    fn test_query_does_not_change_snapshot() {
        let snapshot = IndexBuilder::default().build(&corpus());
        let before = snapshot.stats();

        snapshot.query("brand new vocabulary process", 4);

        assert_eq!(snapshot.stats(), before);
        assert_eq!(snapshot.document_frequency("vocabulary"), 0);
    }

    #[test]
    fn test_top_k_contract() {
        let snapshot = IndexBuilder::default().build(&corpus());
        let query = "process page memory file tcp mutex";

        for k in 0..8 {
            let hits = snapshot.query(query, k);
            assert!(hits.len() <= k);
            assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        }
        assert_eq!(snapshot.query(query, 2).len(), 2);
    }

    #[test]
    fn test_repeated_unique_term_ranks_first() {
        let mut documents = corpus();
        documents.push(Document::new("zebra", "Zebra", "zebra zebra zebra zebra"));
        let snapshot = IndexBuilder::default().build(&documents);

        let hits = snapshot.query("zebra", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].passage.document_id, "zebra");
    }

    #[test]
    fn test_scheduling_ranking_order() {
        let diluted: String = std::iter::once("scheduling".to_string())
            .chain((0..100).map(|i| format!("w{}", i)))
            .collect::<Vec<_>>()
            .join(" ");
        let documents = vec![
            Document::new("pure", "Pure", vec!["scheduling"; 10].join(" ")),
            Document::new("diluted", "Diluted", diluted),
        ];
        let snapshot = IndexBuilder::default().build(&documents);
        assert_eq!(snapshot.len(), 2);

        let hits = snapshot.query("scheduling", 4);
        let order: Vec<&str> = hits.iter().map(|h| h.passage.document_id.as_str()).collect();
        assert_eq!(order, vec!["pure", "diluted"]);
        assert!((hits[0].score - 1.0).abs() < 1e-12);
        assert!(hits[1].score < hits[0].score);
    }

    #[test]
    fn test_ties_keep_passage_order() {
        let documents = vec![
            Document::new("first", "", "mutex lock"),
            Document::new("second", "", "mutex lock"),
            Document::new("third", "", "mutex lock"),
        ];
        let snapshot = IndexBuilder::default().build(&documents);

        let order: Vec<&str> = snapshot
            .query("mutex", 3)
            .iter()
            .map(|h| h.passage.document_id.as_str())
            .collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_query_is_deterministic() {
        let builder = IndexBuilder::new(&IndexConfig {
            chunk_size: 40,
            overlap_size: 10,
        })
        .unwrap();
        let a = builder.build(&corpus());
        let b = builder.build(&corpus());

        let scores_a: Vec<f64> = a.query("each process page", 10).iter().map(|h| h.score).collect();
        let scores_b: Vec<f64> = b.query("each process page", 10).iter().map(|h| h.score).collect();
        assert_eq!(scores_a, scores_b);
        assert_eq!(
            a.query("each process page", 10)
                .iter()
                .map(|h| h.score)
                .collect::<Vec<_>>(),
            scores_a
        );
    }

    #[test]
    fn test_threshold_filters_low_scores() {
        let snapshot = IndexBuilder::default().build(&corpus());
        let all = snapshot.query("process", 10);
        assert_eq!(all.len(), 2);

        let cutoff = all[1].score;
        let filtered = snapshot.query_with_threshold("process", 10, cutoff);
        assert!(filtered.iter().all(|h| h.score > cutoff));
        assert!(filtered.len() < all.len());
    }

    #[test]
    fn test_search_returns_ranked_results() {
        let snapshot = IndexBuilder::default().build(&corpus());
        let results = snapshot.search("sliding window flow control", 3, 0.0);

        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].document_id, "net");
        assert_eq!(results[0].title, "Networking");
        assert!(results.iter().enumerate().all(|(i, r)| r.rank == i + 1));
    }
}
