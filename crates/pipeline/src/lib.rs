//! Pool filtering for recommendation requests.
//!
//! This crate provides:
//! - Filter trait and implementations for narrowing a hydrated pool
//! - FilterPipeline for composing filters
//! - PoolContext describing the seed and the user's explicit choices
//!
//! ## Architecture
//! After candidates are gathered and hydrated, the pipeline narrows the pool
//! along dimensions the user left open before it is handed to the engine:
//! 1. MatureSeedFilter removes family titles when the seed is adult
//! 2. SeedGenreFilter keeps the pool on the seed's genres
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, PoolContext};
//!
//! let context = PoolContext::new(seed_record)
//!     .with_certification(options.certification.clone())
//!     .with_picked_genres(!options.genres.is_empty());
//!
//! let filtered = FilterPipeline::standard().apply(pool, &context)?;
//! ```

pub mod context;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use context::PoolContext;
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
