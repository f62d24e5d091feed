//! Candidate gathering: page through the provider's listings and build a
//! deduplicated, capped list of ids to hydrate.
//!
//! ## Algorithm
//! 1. Discovery pages 1..=N with the request's filter set
//! 2. Similar-to-seed pages 1..=M
//! 3. Concatenate in that order, keep the first occurrence of each id
//! 4. Cap the list
//!
//! Steps 1 and 2 are independent, so callers may run them concurrently
//! and hand both batches to [`merge_candidates`].

use crate::provider::MetadataProvider;
use crate::types::{Candidate, CandidateSource};
use anyhow::{Context, Result};
use catalog::MovieId;
use query::FilterSet;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// How many pages to fetch and how many ids to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatherPlan {
    pub discover_pages: u32,
    pub similar_pages: u32,
    pub pool_cap: usize,
}

impl Default for GatherPlan {
    fn default() -> Self {
        Self {
            discover_pages: 3,
            similar_pages: 2,
            pool_cap: 160,
        }
    }
}

/// Discovery listing pages 1..=pages
#[instrument(skip(provider, filters))]
pub fn discover_candidates(
    provider: &dyn MetadataProvider,
    filters: &FilterSet,
    pages: u32,
) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for page in 1..=pages {
        let ids = provider
            .discover(filters, page)
            .with_context(|| format!("discover page {page} failed"))?;
        candidates.extend(ids.into_iter().map(|id| Candidate::new(id, CandidateSource::Discover, page)));
    }
    debug!("Discovery returned {} candidates", candidates.len());
    Ok(candidates)
}

/// Similar-to-seed listing pages 1..=pages
#[instrument(skip(provider))]
pub fn similar_candidates(
    provider: &dyn MetadataProvider,
    seed_id: MovieId,
    pages: u32,
) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for page in 1..=pages {
        let ids = provider
            .similar(seed_id, page)
            .with_context(|| format!("similar page {page} for {seed_id} failed"))?;
        candidates.extend(ids.into_iter().map(|id| Candidate::new(id, CandidateSource::Similar, page)));
    }
    debug!("Similar listing returned {} candidates", candidates.len());
    Ok(candidates)
}

/// Concatenate batches in order, keep first occurrences, cap the result
pub fn merge_candidates(
    batches: impl IntoIterator<Item = Vec<Candidate>>,
    cap: usize,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Candidate> = batches
        .into_iter()
        .flatten()
        .filter(|c| seen.insert(c.movie_id))
        .collect();
    merged.truncate(cap);
    merged
}

/// Sequential gathering of candidate ids for a seed.
///
/// # Arguments
/// * `provider` - Where the listings come from
/// * `filters` - Discovery parameters for the request
/// * `seed_id` - The seed, used for the similar listing
/// * `plan` - Page counts and pool cap
///
/// # Returns
/// Unique ids in first-seen order, at most `plan.pool_cap` of them. The
/// seed itself may or may not be among them.
pub fn gather_candidate_ids(
    provider: &dyn MetadataProvider,
    filters: &FilterSet,
    seed_id: MovieId,
    plan: GatherPlan,
) -> Result<Vec<MovieId>> {
    let discovered = discover_candidates(provider, filters, plan.discover_pages)?;
    let similar = similar_candidates(provider, seed_id, plan.similar_pages)?;

    Ok(merge_candidates([discovered, similar], plan.pool_cap)
        .into_iter()
        .map(|c| c.movie_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use catalog::{PersonId, RawMovie};

    /// Pages of fixed ids, independent of the filters
    struct ScriptedProvider {
        discover: Vec<Vec<MovieId>>,
        similar: Vec<Vec<MovieId>>,
    }

    impl MetadataProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn search(&self, _query: &str) -> Result<Vec<MovieId>> {
            Ok(Vec::new())
        }

        fn search_person(&self, _name: &str) -> Result<Option<PersonId>> {
            Ok(None)
        }

        fn details(&self, id: MovieId) -> Result<RawMovie> {
            Err(anyhow!("no details for {id}"))
        }

        fn discover(&self, _filters: &FilterSet, page: u32) -> Result<Vec<MovieId>> {
            Ok(self.discover.get(page as usize - 1).cloned().unwrap_or_default())
        }

        fn similar(&self, _id: MovieId, page: u32) -> Result<Vec<MovieId>> {
            if self.similar.is_empty() {
                return Err(anyhow!("similar listing unavailable"));
            }
            Ok(self.similar.get(page as usize - 1).cloned().unwrap_or_default())
        }

        fn trending(&self) -> Result<Vec<MovieId>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_gather_dedups_in_first_seen_order() {
        let provider = ScriptedProvider {
            discover: vec![vec![1, 2, 3], vec![3, 4], vec![]],
            similar: vec![vec![5, 1], vec![6]],
        };

        let ids = gather_candidate_ids(&provider, &FilterSet::new(), 100, GatherPlan::default()).unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_gather_caps_pool() {
        let provider = ScriptedProvider {
            discover: vec![(1..=20).collect(), (21..=40).collect(), (41..=60).collect()],
            similar: vec![vec![99]],
        };
        let plan = GatherPlan {
            pool_cap: 25,
            ..Default::default()
        };

        let ids = gather_candidate_ids(&provider, &FilterSet::new(), 100, plan).unwrap();
        assert_eq!(ids.len(), 25);
        assert_eq!(ids[24], 25);
    }

    #[test]
    fn test_candidates_remember_source_and_page() {
        let provider = ScriptedProvider {
            discover: vec![vec![1], vec![2]],
            similar: vec![vec![3]],
        };

        let discovered = discover_candidates(&provider, &FilterSet::new(), 2).unwrap();
        assert_eq!(discovered[1], Candidate::new(2, CandidateSource::Discover, 2));

        let similar = similar_candidates(&provider, 1, 1).unwrap();
        assert_eq!(similar[0].source, CandidateSource::Similar);
    }

    #[test]
    fn test_listing_errors_propagate() {
        let provider = ScriptedProvider {
            discover: vec![vec![1]],
            similar: vec![],
        };
        let err = gather_candidate_ids(&provider, &FilterSet::new(), 1, GatherPlan::default()).unwrap_err();
        assert!(format!("{err:#}").contains("similar listing unavailable"));
    }
}
