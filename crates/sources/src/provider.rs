//! The metadata-provider collaborator.
//!
//! Everything the recommender knows about movies comes through this trait:
//! listings return ids, `details` returns the full raw record. Network
//! concerns (timeouts, retries, rate limits) belong to implementations.

use anyhow::Result;
use catalog::{MovieId, PersonId, RawMovie};
use query::FilterSet;

/// Listings are paged; pages are 1-based.
pub trait MetadataProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Title search, best match first
    fn search(&self, query: &str) -> Result<Vec<MovieId>>;

    /// Resolve a person's name to their id, best match first.
    ///
    /// `Ok(None)` when nobody matches.
    fn search_person(&self, name: &str) -> Result<Option<PersonId>>;

    /// Full details: genres, credits, keywords and release dates
    fn details(&self, id: MovieId) -> Result<RawMovie>;

    /// One page of movies matching a filter set
    fn discover(&self, filters: &FilterSet, page: u32) -> Result<Vec<MovieId>>;

    /// One page of movies the provider considers similar to `id`
    fn similar(&self, id: MovieId, page: u32) -> Result<Vec<MovieId>>;

    /// Movies trending this week
    fn trending(&self) -> Result<Vec<MovieId>>;
}
