//! Hybrid recommender: content similarity blended with sentiment closeness.
//!
//! ## Algorithm
//! 1. Find the seed row; a missing seed yields an empty result
//! 2. Cosine similarity of the seed against every row, min-max normalized
//!    to [0, 1] with an epsilon in the denominator
//! 3. Sentiment closeness = 1 - |row - seed| / 2
//! 4. hybrid = w_content * similarity + w_sentiment * closeness
//! 5. Drop the seed, stable-sort by hybrid descending, keep the top N

use crate::frame::FeatureFrame;
use crate::sentiment::SentimentAnalyzer;
use crate::similarity::{similarity, SparseVector};
use catalog::{MovieId, MovieRecord};
use tracing::{debug, warn};

/// Guards the min-max denominator when every similarity is equal
const NORMALIZATION_EPSILON: f64 = 1e-9;

/// Blend weights for the hybrid score.
///
/// The weights are expected to sum to 1 but nothing enforces it; a caller
/// using other values is responsible for validating them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridWeights {
    pub content: f64,
    pub sentiment: f64,
}

impl HybridWeights {
    pub fn new(content: f64, sentiment: f64) -> Self {
        Self { content, sentiment }
    }
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            content: 0.75,
            sentiment: 0.25,
        }
    }
}

/// One ranked result
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub record: MovieRecord,
    pub hybrid_score: f64,
    /// Min-max normalized content similarity to the seed
    pub similarity: f64,
    pub sentiment_closeness: f64,
}

/// Ranks a frame against a seed.
///
/// Owns the sentiment analyzer; build one per process and share it.
#[derive(Debug, Clone, Default)]
pub struct HybridRecommender {
    analyzer: SentimentAnalyzer,
}

impl HybridRecommender {
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Rank every non-seed row of `frame` against `seed_id`.
    ///
    /// # Arguments
    /// * `frame` - The request's feature frame (its sentiment column is memoized)
    /// * `vectors` - Weight vectors from `fit`, index-aligned with the frame
    /// * `seed_id` - The movie the user picked
    /// * `top_n` - Maximum number of results
    /// * `weights` - Content / sentiment blend
    ///
    /// # Returns
    /// At most `top_n` results, best first. Empty when the seed is not in
    /// the frame or the frame holds nothing besides the seed.
    pub fn recommend(
        &self,
        frame: &FeatureFrame,
        vectors: &[SparseVector],
        seed_id: MovieId,
        top_n: usize,
        weights: HybridWeights,
    ) -> Vec<Recommendation> {
        let Some(seed_row) = frame.row_of(seed_id) else {
            debug!("Seed {} not in frame, no recommendations", seed_id);
            return Vec::new();
        };

        if vectors.len() != frame.len() {
            warn!(
                "Vector/frame mismatch: vectors={}, rows={}",
                vectors.len(),
                frame.len()
            );
            return Vec::new();
        }

        let sentiment = frame.sentiment(&self.analyzer);
        let Some(raw) = similarity(vectors, seed_row) else {
            return Vec::new();
        };
        let sims = min_max_normalize(&raw);
        let seed_sentiment = sentiment[seed_row];

        let mut scored: Vec<Recommendation> = frame
            .rows()
            .iter()
            .enumerate()
            .filter(|(row, _)| *row != seed_row)
            .map(|(row, record)| {
                let closeness = sentiment_closeness(sentiment[row], seed_sentiment);
                Recommendation {
                    record: record.clone(),
                    hybrid_score: weights.content * sims[row] + weights.sentiment * closeness,
                    similarity: sims[row],
                    sentiment_closeness: closeness,
                }
            })
            .collect();

        // Vec::sort_by is stable, so ties keep frame order
        scored.sort_by(|a, b| {
            b.hybrid_score
                .partial_cmp(&a.hybrid_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_n);

        debug!(
            "Ranked {} of {} rows against seed {}",
            scored.len(),
            frame.len().saturating_sub(1),
            seed_id
        );
        scored
    }
}

/// Min-max normalize into [0, 1]; an all-equal input maps to all zeros
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min + NORMALIZATION_EPSILON;
    values
        .iter()
        .map(|v| ((v - min) / range).clamp(0.0, 1.0))
        .collect()
}

/// 1 for identical sentiment, 0 for opposite extremes (distance 2)
pub fn sentiment_closeness(row: f64, seed: f64) -> f64 {
    1.0 - (row - seed).abs() / 2.0
}
