// file: src/engine/weighting.rs
// description: smoothed tf-idf weights and sparse weight vectors
// reference: vector space model, cosine similarity

use crate::engine::tokenizer::term_frequencies;
use serde::Serialize;
use std::collections::BTreeMap;

/// Added to both passage count and document frequency so idf stays finite
/// for terms no passage contains.
pub const IDF_SMOOTHING: f64 = 1.0;

/// Added after the logarithm so a term present in every passage keeps a
/// positive weight instead of zero.
pub const IDF_BASELINE: f64 = 1.0;

/// Lower bound for a vector norm, keeps the cosine denominator away from zero.
pub const MIN_VECTOR_NORM: f64 = 1.0;

/// `ln((N + 1) / (df + 1)) + 1`
pub fn idf(passage_count: usize, document_frequency: usize) -> f64 {
    ((passage_count as f64 + IDF_SMOOTHING) / (document_frequency as f64 + IDF_SMOOTHING)).ln()
        + IDF_BASELINE
}

/// Sparse term -> weight mapping plus its (floored) Euclidean norm.
///
/// Terms are kept ordered so that sums over the vector are reproducible
/// between builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightVector {
    weights: BTreeMap<String, f64>,
    norm: f64,
}

impl WeightVector {
    /// Weighs each distinct term as `(count / tokens.len()) * idf(term)`.
    pub fn from_tokens<F>(tokens: &[String], idf: F) -> Self
    where
        F: Fn(&str) -> f64,
    {
        if tokens.is_empty() {
            return Self {
                weights: BTreeMap::new(),
                norm: MIN_VECTOR_NORM,
            };
        }

        let total = tokens.len() as f64;
        let weights: BTreeMap<String, f64> = term_frequencies(tokens)
            .into_iter()
            .map(|(term, count)| (term.to_string(), (count as f64 / total) * idf(term)))
            .collect();

        let norm = weights
            .values()
            .map(|w| w * w)
            .sum::<f64>()
            .sqrt()
            .max(MIN_VECTOR_NORM);

        Self { weights, norm }
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Terms missing on either side contribute nothing.
    pub fn dot(&self, other: &WeightVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .weights
            .iter()
            .filter_map(|(term, w)| large.weights.get(term).map(|v| w * v))
            .sum()
    }

    pub fn cosine(&self, other: &WeightVector) -> f64 {
        self.dot(other) / (self.norm * other.norm)
    }
}
