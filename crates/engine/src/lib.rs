//! Recommendation engine: feature frame, TF-IDF similarity, hybrid
//! ranking and explanations.
//!
//! ## Architecture
//! A request flows through the engine in stages:
//! 1. `FeatureFrame` materializes the candidate pool
//! 2. `fit` builds a TF-IDF space over the frame's soups
//! 3. `HybridRecommender` ranks rows against the seed
//! 4. `explain` annotates each result
//!
//! ## Example Usage
//! ```ignore
//! use engine::{fit, explain, FeatureFrame, HybridRecommender, HybridWeights};
//!
//! let frame = FeatureFrame::from_pool(pool);
//! let (_model, vectors) = fit(&frame)?;
//! let recommender = HybridRecommender::default();
//! for rec in recommender.recommend(&frame, &vectors, seed_id, 10, HybridWeights::default()) {
//!     println!("{} {:.3} {}", rec.record.title, rec.hybrid_score,
//!         explain(frame.record(seed_id).unwrap(), &rec.record));
//! }
//! ```

pub mod error;
pub mod explain;
pub mod frame;
pub mod recommender;
pub mod sentiment;
pub mod similarity;
mod stop_words;

// Re-export main types
pub use error::{EngineError, Result};
pub use explain::{explain, Reason, FALLBACK_EXPLANATION};
pub use frame::{build_frame, FeatureFrame};
pub use recommender::{HybridRecommender, HybridWeights, Recommendation};
pub use sentiment::SentimentAnalyzer;
pub use similarity::{fit, similarity, DocumentVectors, SimilarityModel, SparseVector};
