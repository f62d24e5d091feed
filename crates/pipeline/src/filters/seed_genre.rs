//! Filter to keep the pool on the seed's genres.

use crate::context::PoolContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::CandidatePool;
use std::collections::HashSet;

/// Keeps records sharing at least one genre with the seed.
///
/// Does nothing when the user picked genres, when the seed has none, or
/// when no record would survive.
pub struct SeedGenreFilter;

impl Filter for SeedGenreFilter {
    fn name(&self) -> &str {
        "SeedGenreFilter"
    }

    fn apply(&self, pool: CandidatePool, context: &PoolContext) -> Result<CandidatePool> {
        if context.picked_genres || context.seed.genres_list.is_empty() {
            return Ok(pool);
        }

        let seed_genres: HashSet<&str> = context
            .seed
            .genres_list
            .iter()
            .map(String::as_str)
            .collect();
        let shares_genre = |genres: &[String]| genres.iter().any(|g| seed_genres.contains(g.as_str()));

        if !pool.records().iter().any(|r| shares_genre(&r.genres_list)) {
            tracing::debug!("No record shares a seed genre, keeping pool as is");
            return Ok(pool);
        }

        let mut pool = pool;
        pool.retain(|record| shares_genre(&record.genres_list));
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::MovieRecord;

    fn record(id: u64, genres: &[&str]) -> MovieRecord {
        let mut r = MovieRecord::new(id, format!("Movie {id}"));
        r.genres_list = genres.iter().map(|g| g.to_string()).collect();
        r
    }

    #[test]
    fn test_keeps_only_shared_genres() {
        let context = PoolContext::new(record(1, &["Horror", "Thriller"]));
        let pool = CandidatePool::from_records(vec![
            record(2, &["Comedy"]),
            record(3, &["Thriller", "Crime"]),
            record(4, &[]),
            record(5, &["Horror"]),
        ]);

        let filtered = SeedGenreFilter.apply(pool, &context).unwrap();
        let ids: Vec<_> = filtered.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_never_empties_the_pool() {
        let context = PoolContext::new(record(1, &["Western"]));
        let pool = CandidatePool::from_records(vec![record(2, &["Comedy"]), record(3, &["Drama"])]);

        let filtered = SeedGenreFilter.apply(pool, &context).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_picked_genres_disable_filter() {
        let context = PoolContext::new(record(1, &["Horror"])).with_picked_genres(true);
        let pool = CandidatePool::from_records(vec![record(2, &["Comedy"]), record(3, &["Horror"])]);

        let filtered = SeedGenreFilter.apply(pool, &context).unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
