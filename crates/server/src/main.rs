//! Simple test harness for the recommendation service.
//!
//! Builds the model from a data directory and prints recommendations for
//! one user. Usage: `server [data_dir] [user_id]`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::DataIndex;
use hir::ScorerConfig;
use server::RecommendationService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,hir=debug")
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));
    let user_id = match args.next() {
        Some(raw) => raw.parse().context("user id must be an integer")?,
        None => 1,
    };
    let limit = 20;

    info!("Starting HIR server test harness");
    let data_index = Arc::new(
        DataIndex::load_from_files(&data_dir)
            .with_context(|| format!("Failed to load data from {}", data_dir.display()))?,
    );

    let service = RecommendationService::new(data_index, ScorerConfig::default()).await?;

    info!("Getting recommendations for user {} (limit: {})", user_id, limit);
    let recommendations = service.get_recommendations(user_id, limit).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!("{}. {} [{}] - Score: {:.6}", i + 1, rec.title, rec.item_id, rec.score);
    }

    Ok(())
}
