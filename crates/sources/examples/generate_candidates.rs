//! Example: Gather a candidate pool for a seed movie
//!
//! Run with: cargo run --package sources --example generate_candidates -- [seed_id]
//!
//! This example shows how to:
//! 1. Load the sample catalog
//! 2. Build discovery parameters around a seed
//! 3. Gather discovery and similar-to candidates
//! 4. Display the results

use anyhow::Context;
use query::DiscoverOptions;
use sources::{gather_candidate_ids, GatherPlan, LocalCatalogProvider, MetadataProvider};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!("=== CineCompass Candidate Gathering Example ===\n");

    let seed_id = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()
        .context("seed id must be a number")?
        .unwrap_or(694);

    let start = Instant::now();
    let provider = LocalCatalogProvider::load(Path::new("data/sample_catalog.json"))?;
    println!("Loaded {} movies in {:?}\n", provider.len(), start.elapsed());

    let seed = provider.details(seed_id)?;
    println!("Seed: {} ({})", seed.title.as_deref().unwrap_or("?"), seed_id);

    let options = DiscoverOptions {
        min_rating: 0.0,
        year_from: 1900,
        runtime_min: 0,
        runtime_max: 400,
        ..Default::default()
    };
    let filters = options.for_seed(&seed, 5);
    println!("Discovery parameters:");
    for (key, value) in filters.to_params() {
        println!("  {key} = {value}");
    }

    let start = Instant::now();
    let ids = gather_candidate_ids(&provider, &filters, seed_id, GatherPlan::default())?;
    println!("\nGathered {} candidates in {:?}:", ids.len(), start.elapsed());
    for id in ids {
        let details = provider.details(id)?;
        println!("  {:>7}  {}", id, details.title.as_deref().unwrap_or("?"));
    }

    Ok(())
}
