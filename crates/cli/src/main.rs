use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::seq::IndexedRandom;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog::{GenreId, MovieId, MovieRecord, PersonId};
use engine::HybridWeights;
use query::vocab::genre_from_user;
use query::{DiscoverOptions, GenreLogic, QueryParser};
use server::{MovieRecommendation, OrchestratorConfig, RecommendationOrchestrator};
use sources::LocalCatalogProvider;

/// CineCompass - content-based movie recommender
#[derive(Parser)]
#[command(name = "cinecompass")]
#[command(about = "Movie recommendations from a seed title, with natural-language search", long_about = None)]
struct Cli {
    /// Path to a JSON array of full movie details
    #[arg(short, long, default_value = "data/sample_catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a seed movie
    Recommend {
        /// Seed movie id
        #[arg(long)]
        seed: MovieId,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Weight of content similarity; sentiment gets the rest
        #[arg(long, default_value = "0.75")]
        content_weight: f64,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Search the catalog with a free-text query
    Query {
        /// e.g. "dark psychological thriller from the 90s under 2 hours"
        text: String,

        #[arg(long, default_value = "6.0")]
        min_rating: f32,

        #[arg(long, default_value = "0")]
        min_votes: u32,
    },

    /// Show the discovery parameters a free-text query parses into
    Parse {
        text: String,
    },

    /// Search for movies by title
    Search {
        /// Case-insensitive substring of the title
        #[arg(long)]
        title: String,
    },

    /// Show the most popular movies
    Trending,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogicArg {
    And,
    Or,
}

/// Manual discovery controls
#[derive(Args)]
struct OptionArgs {
    #[arg(long, default_value = "1950")]
    year_from: i32,

    #[arg(long, default_value = "2025")]
    year_to: i32,

    #[arg(long, default_value = "6.0")]
    min_rating: f32,

    #[arg(long, default_value = "0")]
    min_votes: u32,

    #[arg(long, default_value = "70")]
    runtime_min: u32,

    #[arg(long, default_value = "200")]
    runtime_max: u32,

    /// US certification, e.g. PG-13
    #[arg(long)]
    cert: Option<String>,

    /// ISO 639-1 language code
    #[arg(long)]
    lang: Option<String>,

    /// Genre names, comma separated, e.g. "horror,science fiction"
    #[arg(long, value_delimiter = ',', value_parser = parse_genre)]
    genres: Vec<GenreId>,

    #[arg(long, value_enum, default_value = "and")]
    genre_logic: LogicArg,

    /// Preferred actor, by name
    #[arg(long)]
    actor: Option<String>,

    /// Preferred director, by name
    #[arg(long)]
    director: Option<String>,
}

fn parse_genre(input: &str) -> Result<GenreId, String> {
    genre_from_user(input).ok_or_else(|| format!("unknown genre '{}'", input.trim()))
}

impl OptionArgs {
    /// Build discovery options, resolving people through the provider.
    /// A name nobody matches is reported and left out.
    async fn into_options(self, orchestrator: &RecommendationOrchestrator) -> Result<DiscoverOptions> {
        let actor = resolve_person(orchestrator, "actor", self.actor.as_deref()).await?;
        let director = resolve_person(orchestrator, "director", self.director.as_deref()).await?;

        Ok(DiscoverOptions {
            year_from: self.year_from,
            year_to: self.year_to,
            min_rating: self.min_rating,
            min_votes: self.min_votes,
            runtime_min: self.runtime_min,
            runtime_max: self.runtime_max,
            certification: self.cert,
            language: self.lang,
            genres: self.genres,
            genre_logic: match self.genre_logic {
                LogicArg::And => GenreLogic::And,
                LogicArg::Or => GenreLogic::Or,
            },
            actor,
            director,
        })
    }
}

async fn resolve_person(
    orchestrator: &RecommendationOrchestrator,
    role: &str,
    name: Option<&str>,
) -> Result<Option<PersonId>> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let found = orchestrator.resolve_person(name).await?;
    if found.is_none() {
        println!("{} No {} named '{}', ignoring it.", "!".yellow(), role, name);
    }
    Ok(found)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Parsing needs no catalog
    if let Commands::Parse { text } = &cli.command {
        return handle_parse(text);
    }

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let provider = Arc::new(
        LocalCatalogProvider::load(&cli.catalog).context("Failed to load movie catalog")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        provider.len(),
        start.elapsed()
    );
    let ids = provider.ids();
    let orchestrator = RecommendationOrchestrator::new(provider);

    match cli.command {
        Commands::Recommend {
            seed,
            limit,
            content_weight,
            options,
        } => {
            let options = options.into_options(&orchestrator).await?;
            handle_recommend(orchestrator, seed, limit, content_weight, options).await?
        }
        Commands::Query {
            text,
            min_rating,
            min_votes,
        } => handle_query(orchestrator, &text, min_rating, min_votes).await?,
        Commands::Search { title } => handle_search(orchestrator, &title).await?,
        Commands::Trending => handle_trending(orchestrator).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(orchestrator, &ids, requests, concurrent).await?,
        Commands::Parse { .. } => {}
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: RecommendationOrchestrator,
    seed: MovieId,
    limit: usize,
    content_weight: f64,
    options: DiscoverOptions,
) -> Result<()> {
    if !(0.0..=1.0).contains(&content_weight) {
        bail!("--content-weight must be between 0 and 1, got {}", content_weight);
    }

    let config = OrchestratorConfig {
        top_n: limit,
        weights: HybridWeights::new(content_weight, 1.0 - content_weight),
        ..Default::default()
    };
    let orchestrator = orchestrator.with_config(config);

    let report = orchestrator.recommend_for_seed(seed, &options).await?;

    println!(
        "{}",
        format!("Because you picked {}:", describe(&report.seed)).bold().blue()
    );
    if report.is_empty() {
        println!(
            "{} No recommendations. Try widening the year range or lowering the rating floor.",
            "!".yellow()
        );
        return Ok(());
    }
    print_recommendations(&report.recommendations);
    Ok(())
}

/// Handle the 'query' command
async fn handle_query(
    orchestrator: RecommendationOrchestrator,
    text: &str,
    min_rating: f32,
    min_votes: u32,
) -> Result<()> {
    let options = DiscoverOptions {
        min_rating,
        min_votes,
        ..Default::default()
    };
    let results = orchestrator.natural_language_search(text, &options).await?;

    println!("{}", "Parsed filters:".bold().blue());
    for (key, value) in results.filters.to_params() {
        println!("  {} = {}", key.cyan(), value);
    }

    if results.matches.is_empty() {
        println!("{} No movies matched that query.", "!".yellow());
        return Ok(());
    }
    print_movies(&format!("Results for '{}':", text), &results.matches);
    Ok(())
}

/// Handle the 'parse' command
fn handle_parse(text: &str) -> Result<()> {
    let filters = QueryParser::new().parse(text);
    println!("{}", format!("Parameters for '{}':", text).bold().blue());
    if filters.is_empty() {
        println!("  (none)");
    }
    for (key, value) in filters.to_params() {
        println!("  {} = {}", key.cyan(), value);
    }
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(orchestrator: RecommendationOrchestrator, title: &str) -> Result<()> {
    let matches = orchestrator.search_titles(title).await?;
    if matches.is_empty() {
        println!("{} No titles contain '{}'.", "!".yellow(), title);
        return Ok(());
    }
    print_movies(&format!("Search results for '{}':", title), &matches);
    Ok(())
}

/// Handle the 'trending' command
async fn handle_trending(orchestrator: RecommendationOrchestrator) -> Result<()> {
    let movies = orchestrator.trending().await?;
    print_movies("Trending:", &movies);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: RecommendationOrchestrator,
    ids: &[MovieId],
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    if ids.is_empty() {
        bail!("Catalog is empty, nothing to benchmark");
    }

    // Random seeds drawn from the catalog
    let mut rng = rand::rng();
    let seeds: Vec<MovieId> = (0..requests)
        .filter_map(|_| ids.choose(&mut rng).copied())
        .collect();

    let options = DiscoverOptions::default();
    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let orchestrator = orchestrator.clone();
        let options = options.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            orchestrator.recommend_for_seed(seed, &options).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    let Some(summary) = LatencySummary::from_timings(&mut timings) else {
        bail!("No benchmark requests completed");
    };
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", summary.average);
    println!("P50 latency: {:?}", summary.p50);
    println!("P95 latency: {:?}", summary.p95);
    println!("P99 latency: {:?}", summary.p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Latency statistics over a benchmark run
#[derive(Debug, PartialEq)]
struct LatencySummary {
    average: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
}

impl LatencySummary {
    /// Sorts `timings` in place. `None` when there are no timings.
    fn from_timings(timings: &mut [Duration]) -> Option<Self> {
        if timings.is_empty() {
            return None;
        }
        timings.sort();

        let count = u32::try_from(timings.len()).unwrap_or(u32::MAX);
        let last = timings.len() - 1;
        let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(last)];
        Some(Self {
            average: timings.iter().sum::<Duration>() / count,
            p50: percentile(0.50),
            p95: percentile(0.95),
            p99: percentile(0.99),
        })
    }
}

fn describe(movie: &MovieRecord) -> String {
    match movie.year() {
        Some(year) => format!("{} ({})", movie.title, year),
        None => movie.title.clone(),
    }
}

fn print_recommendations(recommendations: &[MovieRecommendation]) {
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {:.3} (content {:.2}, tone {:.2})",
            (i + 1).to_string().green(),
            describe(&rec.record),
            rec.record.genres_list.join(", "),
            rec.hybrid_score,
            rec.similarity,
            rec.sentiment_closeness
        );
        println!("   {}", rec.explanation.dimmed());
    }
}

fn print_movies(header: &str, movies: &[MovieRecord]) {
    println!("{}", header.bold().blue());
    for movie in movies {
        println!(
            "{}: {} [{}] {:.1}/10 ({} votes)",
            movie.id,
            describe(movie),
            movie.genres_list.join(", "),
            movie.vote_average,
            movie.vote_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_summary_of_no_timings_is_none() {
        assert_eq!(LatencySummary::from_timings(&mut []), None);
    }

    #[test]
    fn test_latency_summary_percentiles() {
        let mut timings: Vec<Duration> = (1..=100).rev().map(Duration::from_millis).collect();
        let summary = LatencySummary::from_timings(&mut timings).unwrap();

        assert_eq!(summary.average, Duration::from_micros(50_500));
        assert_eq!(summary.p50, Duration::from_millis(51));
        assert_eq!(summary.p95, Duration::from_millis(96));
        assert_eq!(summary.p99, Duration::from_millis(100));
    }

    #[test]
    fn test_benchmark_rejects_zero_requests() {
        let provider = Arc::new(LocalCatalogProvider::from_records(Vec::new()));
        let orchestrator = RecommendationOrchestrator::new(provider);
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let result = runtime.block_on(handle_benchmark(orchestrator, &[1], 0, 4));
        assert!(result.is_err());
    }

    #[test]
    fn test_genres_and_people_are_taken_by_name() {
        let cli = Cli::try_parse_from([
            "cinecompass",
            "recommend",
            "--seed",
            "694",
            "--genres",
            "Horror,science fiction",
            "--director",
            "Stanley Kubrick",
        ])
        .unwrap();

        let Commands::Recommend { options, .. } = cli.command else {
            panic!("expected the recommend command");
        };
        assert_eq!(options.genres, vec![27, 878]);
        assert_eq!(options.director.as_deref(), Some("Stanley Kubrick"));
    }

    #[test]
    fn test_unknown_genre_is_rejected() {
        let result = Cli::try_parse_from(["cinecompass", "recommend", "--seed", "1", "--genres", "space opera"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_options_resolve_director_name() {
        let shining: catalog::RawMovie = serde_json::from_value(serde_json::json!({
            "id": 694,
            "title": "The Shining",
            "credits": {"crew": [{"id": 240, "job": "Director", "name": "Stanley Kubrick"}]}
        }))
        .unwrap();
        let provider = Arc::new(LocalCatalogProvider::from_records(vec![shining]));
        let orchestrator = RecommendationOrchestrator::new(provider);

        let cli = Cli::try_parse_from([
            "cinecompass", "recommend", "--seed", "694", "--director", "stanley kubrick", "--actor", "Nobody",
        ])
        .unwrap();
        let Commands::Recommend { options, .. } = cli.command else {
            panic!("expected the recommend command");
        };

        let options = options.into_options(&orchestrator).await.unwrap();
        assert_eq!(options.director, Some(240));
        assert_eq!(options.actor, None);
    }
}
