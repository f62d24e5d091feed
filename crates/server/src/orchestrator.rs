//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline for a seed movie:
//! 1. Fetch the seed's full details
//! 2. Build discovery parameters from the user's options and the seed
//! 3. Gather candidates (discovery + similar listings in parallel)
//! 4. Merge, deduplicate and cap the candidate ids
//! 5. Hydrate and normalize candidates; make sure the seed is in the pool
//! 6. Apply the pool filters
//! 7. Fit the similarity space, rank with the hybrid recommender, explain
//!
//! It also serves natural-language search, trending and title search,
//! which share the hydration step.
//!
//! Provider calls and ranking are blocking work, so each runs on tokio's
//! blocking pool.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use catalog::loader::normalize_batch;
use catalog::{normalize, CandidatePool, MovieId, MovieRecord, PersonId, RawMovie};
use engine::{explain, fit, EngineError, FeatureFrame, HybridRecommender, HybridWeights};
use pipeline::{FilterPipeline, PoolContext};
use query::{DiscoverOptions, FilterSet, QueryParser};
use sources::{
    discover_candidates, merge_candidates, similar_candidates, Candidate, GatherPlan,
    MetadataProvider,
};

/// Tunables for every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    pub gather: GatherPlan,
    /// Recommendations per request
    pub top_n: usize,
    pub weights: HybridWeights,
    /// How many seed keywords widen discovery when genres and people are open
    pub seed_keywords: usize,
    /// Results shown for searches, trending and natural-language queries
    pub listing_size: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            gather: GatherPlan::default(),
            top_n: 10,
            weights: HybridWeights::default(),
            seed_keywords: 5,
            listing_size: 12,
        }
    }
}

/// One ranked movie with its explanation
#[derive(Debug, Clone)]
pub struct MovieRecommendation {
    pub record: MovieRecord,
    pub hybrid_score: f64,
    pub similarity: f64,
    pub sentiment_closeness: f64,
    pub explanation: String,
}

/// The outcome of a recommendation request
#[derive(Debug, Clone)]
pub struct RecommendationReport {
    pub seed: MovieRecord,
    /// Rows in the feature frame, seed included
    pub pool_size: usize,
    /// Best first. Empty means the filters left nothing to recommend.
    pub recommendations: Vec<MovieRecommendation>,
}

impl RecommendationReport {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// The outcome of a natural-language query
#[derive(Debug, Clone)]
pub struct QueryResults {
    /// Parsed filters after merging the quality floor
    pub filters: FilterSet,
    pub matches: Vec<MovieRecord>,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    provider: Arc<dyn MetadataProvider>,
    recommender: HybridRecommender,
    filter_pipeline: Arc<FilterPipeline>,
    parser: QueryParser,
    config: OrchestratorConfig,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with the standard pool filters and defaults
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            recommender: HybridRecommender::default(),
            filter_pipeline: Arc::new(FilterPipeline::standard()),
            parser: QueryParser::new(),
            config: OrchestratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the year used by relative date phrases ("last 5 years")
    pub fn with_parser(mut self, parser: QueryParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Main entry point: recommendations for a seed movie
    ///
    /// # Arguments
    /// * `seed_id` - The movie the user picked
    /// * `options` - The user's explicit filter controls
    ///
    /// # Returns
    /// A report with at most `top_n` recommendations, best first. An empty
    /// report is a normal outcome (filters too narrow), not an error.
    #[instrument(skip(self, options))]
    pub async fn recommend_for_seed(
        &self,
        seed_id: MovieId,
        options: &DiscoverOptions,
    ) -> Result<RecommendationReport> {
        let start_time = Instant::now();

        let seed_raw = self
            .run_blocking("Seed details", move |provider| provider.details(seed_id))
            .await
            .context("Failed to fetch seed details")?;
        let seed = normalize(&seed_raw).context("Seed record is malformed")?;
        info!("Seed {} is \"{}\"", seed_id, seed.title);

        let filters = options.for_seed(&seed_raw, self.config.seed_keywords);
        let (discovered, similar) = self.gather_parallel(filters, seed_id).await?;
        info!(
            "Gathered {} discovery and {} similar candidates",
            discovered.len(),
            similar.len()
        );

        let candidates = merge_candidates([discovered, similar], self.config.gather.pool_cap);
        info!("Merged candidates, total after deduplication: {}", candidates.len());

        let ids: Vec<MovieId> = candidates.iter().map(|c| c.movie_id).collect();
        let mut pool = self.hydrate(ids).await?;
        if !pool.contains(seed_id) {
            pool.push(seed.clone());
        }
        info!("Hydrated pool of {} movies", pool.len());

        let context = PoolContext::new(seed.clone())
            .with_certification(options.picked_certification().map(str::to_string))
            .with_picked_genres(options.picked_genres());
        let pool = self
            .filter_pipeline
            .apply(pool, &context)
            .context("Failed to apply pool filters")?;
        info!("Applied filters, {} movies remain", pool.len());

        let report = self.rank(seed, pool).await?;
        info!(
            "Selected {} recommendations from a pool of {} in {:.2?}",
            report.recommendations.len(),
            report.pool_size,
            start_time.elapsed()
        );
        Ok(report)
    }

    /// Parse a free-text query and list the first page of matches
    ///
    /// The user's rating and vote minimums apply unless the query names its own.
    #[instrument(skip(self, options))]
    pub async fn natural_language_search(
        &self,
        text: &str,
        options: &DiscoverOptions,
    ) -> Result<QueryResults> {
        let mut filters = self.parser.parse(text);
        filters.merge_missing(&options.quality_floor());
        info!("Parsed query into {} parameters", filters.to_params().len());

        let discover_filters = filters.clone();
        let ids = self
            .run_blocking("Discover", move |provider| provider.discover(&discover_filters, 1))
            .await
            .context("Failed to run discovery")?;

        let matches = self.hydrate_listing(ids).await?;
        if matches.is_empty() {
            warn!("No movies matched the query");
        }
        Ok(QueryResults { filters, matches })
    }

    /// This week's trending movies
    pub async fn trending(&self) -> Result<Vec<MovieRecord>> {
        let ids = self
            .run_blocking("Trending", |provider| provider.trending())
            .await
            .context("Failed to fetch trending movies")?;
        self.hydrate_listing(ids).await
    }

    /// Title search, for picking a seed
    #[instrument(skip(self))]
    pub async fn search_titles(&self, title: &str) -> Result<Vec<MovieRecord>> {
        let title = title.to_string();
        let ids = self
            .run_blocking("Search", move |provider| provider.search(&title))
            .await
            .context("Failed to search titles")?;
        self.hydrate_listing(ids).await
    }

    /// Resolve an actor or director name to a person id
    #[instrument(skip(self))]
    pub async fn resolve_person(&self, name: &str) -> Result<Option<PersonId>> {
        let name = name.to_string();
        let found = self
            .run_blocking("Person search", move |provider| provider.search_person(&name))
            .await
            .context("Failed to search people")?;
        if found.is_none() {
            warn!("No person matched the given name");
        }
        Ok(found)
    }

    /// Run a provider call on the blocking pool
    async fn run_blocking<T, F>(&self, label: &'static str, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn MetadataProvider>) -> Result<T> + Send + 'static,
    {
        let provider = self.provider.clone();
        tokio::task::spawn_blocking(move || call(provider))
            .await
            .with_context(|| format!("{label} task panicked"))?
    }

    /// Run the discovery and similar listings in parallel
    async fn gather_parallel(
        &self,
        filters: FilterSet,
        seed_id: MovieId,
    ) -> Result<(Vec<Candidate>, Vec<Candidate>)> {
        let plan = self.config.gather;
        let (discover_result, similar_result) = tokio::join!(
            self.run_blocking("Discover", move |provider| {
                discover_candidates(provider.as_ref(), &filters, plan.discover_pages)
            }),
            self.run_blocking("Similar", move |provider| {
                similar_candidates(provider.as_ref(), seed_id, plan.similar_pages)
            })
        );

        let discovered = discover_result.context("Failed to gather discovery candidates")?;
        let similar = similar_result.context("Failed to gather similar candidates")?;
        Ok((discovered, similar))
    }

    /// Fetch details for every id and normalize them into a pool.
    ///
    /// Ids whose details cannot be fetched are logged and left out.
    async fn hydrate(&self, ids: Vec<MovieId>) -> Result<CandidatePool> {
        let raws: Vec<RawMovie> = self
            .run_blocking("Hydrate", move |provider| {
                let raws: Vec<RawMovie> = ids
                    .into_iter()
                    .filter_map(|id| match provider.details(id) {
                        Ok(raw) => Some(raw),
                        Err(e) => {
                            warn!("Skipping movie {}: {:#}", id, e);
                            None
                        }
                    })
                    .collect();
                Ok(raws)
            })
            .await?;
        Ok(normalize_batch(&raws))
    }

    async fn hydrate_listing(&self, mut ids: Vec<MovieId>) -> Result<Vec<MovieRecord>> {
        ids.truncate(self.config.listing_size);
        Ok(self.hydrate(ids).await?.into_records())
    }

    /// Fit, rank and explain on the blocking pool
    async fn rank(&self, seed: MovieRecord, pool: CandidatePool) -> Result<RecommendationReport> {
        let recommender = self.recommender.clone();
        let top_n = self.config.top_n;
        let weights = self.config.weights;

        tokio::task::spawn_blocking(move || {
            let frame = FeatureFrame::from_pool(pool);
            let pool_size = frame.len();

            let vectors = match fit(&frame) {
                Ok((_, vectors)) => vectors,
                Err(EngineError::EmptyVocabulary) => {
                    warn!("Pool has no usable text, no recommendations");
                    return RecommendationReport {
                        seed,
                        pool_size,
                        recommendations: Vec::new(),
                    };
                }
                Err(e) => {
                    warn!("Similarity fit failed: {}", e);
                    return RecommendationReport {
                        seed,
                        pool_size,
                        recommendations: Vec::new(),
                    };
                }
            };

            let recommendations = recommender
                .recommend(&frame, &vectors, seed.id, top_n, weights)
                .into_iter()
                .map(|rec| MovieRecommendation {
                    explanation: explain(&seed, &rec.record),
                    record: rec.record,
                    hybrid_score: rec.hybrid_score,
                    similarity: rec.similarity,
                    sentiment_closeness: rec.sentiment_closeness,
                })
                .collect();

            RecommendationReport {
                seed,
                pool_size,
                recommendations,
            }
        })
        .await
        .context("Ranking task panicked")
    }
}
