use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::Dataset;
use engine::RecommendationEngine;
use enrichment::{ConfigError, EnrichmentClient, TmdbClient, TmdbConfig};
use recommender::{Enrichment, MovieRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Movie Recs - similar-title recommender
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Recommends movies similar to a title using a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory holding movies.json and similarity.json
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Skip poster and trailer lookups
        #[arg(long)]
        offline: bool,
    },

    /// Search for catalog titles
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of matches to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List catalog titles in order
    Titles {
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Measure ranking latency over random catalog titles
    Benchmark {
        /// Number of lookups to make
        #[arg(long, default_value = "1000")]
        requests: usize,
    },
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

    // Load catalog and similarity matrix once; read-only from here on
    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Dataset::load_from_files(&cli.data_dir).context("Failed to load dataset")?;
    let engine = Arc::new(
        RecommendationEngine::from_dataset(dataset).context("Failed to build recommendation engine")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        engine.len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            limit,
            offline,
        } => handle_recommend(engine, &title, limit, offline).await?,
        Commands::Search { title, limit } => handle_search(&engine, &title, limit),
        Commands::Titles { limit } => handle_titles(&engine, limit),
        Commands::Benchmark { requests } => handle_benchmark(&engine, requests)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    engine: Arc<RecommendationEngine>,
    title: &str,
    limit: usize,
    offline: bool,
) -> Result<()> {
    // Validate the selection before asking for recommendations
    if !engine.contains(title) {
        let suggestions = engine.search(title, 5);
        if !suggestions.is_empty() {
            println!("{}", "Did you mean:".yellow());
            for entry in suggestions {
                println!("  - {}", entry.title);
            }
        }
        bail!("'{}' is not in the catalog", title);
    }

    let orchestrator = if offline {
        RecommendationOrchestrator::offline(engine)
    } else {
        enrichment_orchestrator(engine, TmdbConfig::from_env())?
    };

    let recommendations = orchestrator.get_recommendations_n(title, limit).await?;
    print_recommendations(title, &recommendations);
    Ok(())
}

/// Wire the TMDB client into an orchestrator, pointing at `--offline` when unconfigured
fn enrichment_orchestrator(
    engine: Arc<RecommendationEngine>,
    config: std::result::Result<TmdbConfig, ConfigError>,
) -> Result<RecommendationOrchestrator> {
    let config = config
        .context("Failed to load TMDB configuration (set TMDB_API_KEY or pass --offline)")?;
    let source = TmdbClient::from_config(&config).context("Failed to create TMDB client")?;
    info!("Enriching results from {}", source.api_url());
    let client = EnrichmentClient::new(Arc::new(source), config.retry_policy());
    Ok(RecommendationOrchestrator::new(engine, client))
}

/// Handle the 'search' command
fn handle_search(engine: &RecommendationEngine, title: &str, limit: usize) {
    let matches = engine.search(title, limit);
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for entry in matches {
        println!("{}: {}", entry.movie_id, entry.title);
    }
}

/// Handle the 'titles' command
fn handle_titles(engine: &RecommendationEngine, limit: usize) {
    for (position, title) in engine.titles().take(limit).enumerate() {
        println!("{:>5}. {}", position + 1, title);
    }
    if engine.len() > limit {
        println!("... and {} more", engine.len() - limit);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(engine: &RecommendationEngine, requests: usize) -> Result<()> {
    if engine.is_empty() || requests == 0 {
        bail!("Nothing to benchmark");
    }

    // Pick random catalog titles
    let titles: Vec<String> = (0..requests)
        .filter_map(|_| {
            let index = rand::random::<u32>() as usize % engine.len();
            engine.entry(index).map(|entry| entry.title.clone())
        })
        .collect();

    let mut timings: Vec<Duration> = Vec::with_capacity(titles.len());
    for title in &titles {
        let start = Instant::now();
        engine.recommend(title)?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[MovieRecommendation]) {
    println!(
        "{}",
        format!("Movies similar to '{}':", title).bold().blue()
    );
    if recommendations.is_empty() {
        println!("  (catalog has no other titles)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Similarity: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.movie_id,
            rec.score
        );
        println!("   Poster:  {}", rec.poster_url());
        match (&rec.trailer, rec.trailer_url()) {
            (_, Some(url)) => println!("   Trailer: {}", url),
            (Enrichment::Skipped, None) => {}
            _ => println!("   Trailer: {}", "Trailer not available".dimmed()),
        }
    }
}
