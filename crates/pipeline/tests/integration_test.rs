//! Integration tests for the pipeline.
//!
//! These tests verify that the standard filters work together on a
//! realistic hydrated pool.

use catalog::{CandidatePool, MovieRecord};
use pipeline::filters::*;
use pipeline::{FilterPipeline, PoolContext};

fn record(id: u64, cert: Option<&str>, genres: &[&str]) -> MovieRecord {
    let mut r = MovieRecord::new(id, format!("Movie {id}"));
    r.cert = cert.map(str::to_string);
    r.genres_list = genres.iter().map(|g| g.to_string()).collect();
    r
}

fn create_test_setup() -> (MovieRecord, CandidatePool) {
    let seed = record(1, Some("R"), &["Horror", "Thriller"]);
    let pool = CandidatePool::from_records(vec![
        seed.clone(),
        record(2, Some("PG-13"), &["Horror"]),
        record(3, Some("R"), &["Thriller"]),
        record(4, Some("R"), &["Comedy"]),
        record(5, None, &["Horror", "Mystery"]),
        record(6, Some("G"), &["Animation"]),
    ]);
    (seed, pool)
}

fn ids(pool: &CandidatePool) -> Vec<u64> {
    pool.records().iter().map(|r| r.id).collect()
}

#[test]
fn test_standard_pipeline() {
    let (seed, pool) = create_test_setup();
    let context = PoolContext::new(seed);

    let filtered = FilterPipeline::standard().apply(pool, &context).unwrap();
    assert_eq!(ids(&filtered), vec![1, 3, 5]);
}

#[test]
fn test_explicit_choices_keep_pool() {
    let (seed, pool) = create_test_setup();
    let context = PoolContext::new(seed)
        .with_certification(Some("PG-13".to_string()))
        .with_picked_genres(true);

    let filtered = FilterPipeline::standard().apply(pool, &context).unwrap();
    assert_eq!(filtered.len(), 6);
}

#[test]
fn test_filter_order_matters_only_through_pool_contents() {
    let (seed, pool) = create_test_setup();
    let context = PoolContext::new(seed);

    let reversed = FilterPipeline::new()
        .add_filter(SeedGenreFilter)
        .add_filter(MatureSeedFilter)
        .apply(pool, &context)
        .unwrap();
    assert_eq!(ids(&reversed), vec![1, 3, 5]);
}
