//! Core traits for the pool filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a hydrated candidate pool.

use crate::context::PoolContext;
use anyhow::Result;
use catalog::CandidatePool;

/// Core trait for filtering a candidate pool.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with blocking worker threads
/// - Filters take ownership of the pool and return the narrowed pool
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a pool.
    ///
    /// # Arguments
    /// * `pool` - The hydrated pool to filter (takes ownership)
    /// * `context` - The seed and the user's explicit choices
    ///
    /// # Returns
    /// * `Ok(CandidatePool)` - The filtered pool, order preserved
    /// * `Err` - If filtering fails
    fn apply(&self, pool: CandidatePool, context: &PoolContext) -> Result<CandidatePool>;
}
