//! The FilterPipeline chains pool filters together using the builder pattern.

use crate::context::PoolContext;
use crate::filters::{MatureSeedFilter, SeedGenreFilter};
use crate::traits::Filter;
use anyhow::Result;
use catalog::CandidatePool;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MatureSeedFilter)
///     .add_filter(SeedGenreFilter);
///
/// let filtered = pipeline.apply(pool, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The filters applied to every recommendation pool
    pub fn standard() -> Self {
        Self::new()
            .add_filter(MatureSeedFilter)
            .add_filter(SeedGenreFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence.
    ///
    /// # Arguments
    /// * `pool` - The hydrated pool
    /// * `context` - Seed and explicit user choices
    ///
    /// # Returns
    /// * `Ok(CandidatePool)` - The pool after every filter
    /// * `Err` - If any filter fails
    pub fn apply(&self, pool: CandidatePool, context: &PoolContext) -> Result<CandidatePool> {
        let mut current = pool;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
