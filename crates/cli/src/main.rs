use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, UserId};
use hir::ScorerConfig;
use rand::seq::IndexedRandom;
use server::{ItemRecommendation, RecommendationService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// HIR Recs - hybrid item ranking recommender
#[derive(Parser)]
#[command(name = "hir-recs")]
#[command(about = "Recommends items by blending co-ratings with genre proximity", long_about = None)]
struct Cli {
    /// Directory holding ratings.csv and genres.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON file with scorer weights, e.g. {"direct_association": 0.3, "proximity": 0.2}
    #[arg(long)]
    config: Option<PathBuf>,

    /// Weight of the direct association signal (overrides --config)
    #[arg(long)]
    direct_association: Option<f64>,

    /// Weight of the genre proximity signal (overrides --config)
    #[arg(long)]
    proximity: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations for one or more users
    Recommend {
        /// User IDs to get recommendations for
        #[arg(long, num_args = 1.., required = true)]
        user_id: Vec<UserId>,

        /// Number of recommendations to return per user
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show a user's rating history and preference weights
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Recommendations requested per user
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    debug!(?config, "Resolved scorer configuration");

    println!("Loading dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&cli.data_dir).context("Failed to load dataset")?,
    );
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let start = Instant::now();
    let service = RecommendationService::new(data_index, config).await?;
    println!("{} Built model in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Recommend { user_id, limit } => handle_recommend(&service, &user_id, limit).await?,
        Commands::User { user_id } => handle_user(&service, user_id)?,
        Commands::Benchmark { requests, limit } => {
            handle_benchmark(&service, requests, limit).await?
        }
    }

    Ok(())
}

/// Defaults, then the JSON file, then individual flags
fn resolve_config(cli: &Cli) -> Result<ScorerConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ScorerConfig::default(),
    };
    if let Some(weight) = cli.direct_association {
        config = config.with_direct_association(weight);
    }
    if let Some(weight) = cli.proximity {
        config = config.with_proximity(weight);
    }
    config.validate().context("Invalid scorer weights")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<ScorerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    service: &RecommendationService,
    user_ids: &[UserId],
    limit: usize,
) -> Result<()> {
    for &user_id in user_ids {
        if service.data_index().get_user_ratings(user_id).is_empty() {
            println!("{}", format!("User {} has no ratings", user_id).yellow());
        }
        let recommendations = service.get_recommendations(user_id, limit).await?;
        print_recommendations(user_id, &recommendations);
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(service: &RecommendationService, user_id: UserId) -> Result<()> {
    let profile = service.user_profile(user_id)?;
    if profile.ratings.is_empty() {
        bail!("User {} not found", user_id);
    }

    println!("{}", format!("User ID: {}", user_id).bold().blue());
    let total: f64 = profile.ratings.iter().map(|r| r.2).sum();
    println!("{}Number of ratings: {}", "• ".cyan(), profile.ratings.len());
    println!(
        "{}Average rating: {:.2}",
        "• ".cyan(),
        total / profile.ratings.len() as f64
    );

    let mut ratings = profile.ratings;
    ratings.sort_by(|a, b| b.3.partial_cmp(&a.3).unwrap_or(std::cmp::Ordering::Equal));
    println!("Rated items (by preference weight):");
    for (item, title, rating, weight) in ratings {
        println!("  - {} ({}): rating {} weight {:.4}", item, title, rating, weight);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    service: &RecommendationService,
    requests: usize,
    limit: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let known_users = service.data_index().user_ids();
    let user_ids: Vec<UserId> = {
        let mut rng = rand::rng();
        (0..requests)
            .filter_map(|_| known_users.choose(&mut rng).copied())
            .collect()
    };
    if user_ids.is_empty() {
        bail!("Dataset has no users to benchmark");
    }

    let wall = Instant::now();
    let mut handles = vec![];
    for user in user_ids {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let start = Instant::now();
            service.get_recommendations(user, limit).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall = wall.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Wall time: {:?}", wall);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        timings.len() as f64 / wall.as_secs_f64()
    );

    Ok(())
}

fn print_recommendations(user_id: UserId, recommendations: &[ItemRecommendation]) {
    println!("{}", format!("Recommendations for user {}:", user_id).bold().blue());
    for rec in recommendations {
        println!("{} ({}): {:.10}", rec.item_id, rec.title, rec.score);
    }
}
