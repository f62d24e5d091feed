//! Filter implementations for the pool pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod mature_seed;
pub mod seed_genre;

// Re-export for convenience
pub use mature_seed::MatureSeedFilter;
pub use seed_genre::SeedGenreFilter;
