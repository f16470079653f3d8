//! # Recommendation Service
//!
//! This module ties the data index to the HIR model:
//! 1. Build the model once from the full index (on the blocking pool)
//! 2. Look up the user's rating history
//! 3. Score every catalog item the user has not rated
//! 4. Rank, truncate and attach titles
//!
//! The service is cheap to clone. Every clone shares the same index and model,
//! so concurrent requests never copy matrices.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use data_loader::{DataIndex, ItemId, UserId};
use hir::{build_model, HistorySource, ItemCatalog, ItemScorer, ScoredItem, Scorer, ScorerConfig};

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecommendation {
    pub item_id: ItemId,
    pub title: String,
    pub score: f64,
}

/// A user's rating history alongside the preference weight each rating
/// carries into scoring
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_id: UserId,
    /// `(item, title, rating, preference weight)`, in item order
    pub ratings: Vec<(ItemId, String, f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct RecommendationService {
    data_index: Arc<DataIndex>,
    scorer: Scorer,
}

impl RecommendationService {
    /// Validate the blend weights and build the model over every item in
    /// the index.
    ///
    /// Model building is quadratic in the catalog size, so it runs on the
    /// blocking pool.
    pub async fn new(data_index: Arc<DataIndex>, config: ScorerConfig) -> Result<Self> {
        config.validate().context("Invalid scorer configuration")?;

        let start = Instant::now();
        let model = tokio::task::spawn_blocking({
            let data_index = data_index.clone();
            move || {
                let catalog = ItemCatalog::new(data_index.item_ids());
                build_model(catalog, data_index.as_ref(), data_index.as_ref())
            }
        })
        .await
        .context("Model build task panicked")?
        .context("Failed to build HIR model")?;
        info!(
            items = model.catalog().len(),
            "Model ready in {:.2?}",
            start.elapsed()
        );

        let scorer = Scorer::new(Arc::new(model), config)?;
        Ok(Self { data_index, scorer })
    }

    pub fn config(&self) -> &ScorerConfig {
        self.scorer.config()
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    /// Main entry point: the `limit` highest scoring unrated items for a user,
    /// best first.
    pub async fn get_recommendations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ItemRecommendation>> {
        let start = Instant::now();

        let scored = tokio::task::spawn_blocking({
            let service = self.clone();
            move || service.score_user(user_id)
        })
        .await
        .context("Scoring task panicked")??;

        let recommendations = self.rank_and_select(scored, limit);
        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// History and preference weights for one user
    pub fn user_profile(&self, user_id: UserId) -> Result<UserProfile> {
        let history = self.data_index.user_history(user_id);
        let preferences = self
            .scorer
            .preference_vector(&history)
            .with_context(|| format!("Failed to build preferences for user {}", user_id))?;

        let catalog = self.scorer.model().catalog();
        let ratings = history
            .iter()
            .map(|(item, rating)| {
                let weight = catalog.index_of(item).map_or(0.0, |pos| preferences[pos]);
                (item, self.title_of(item), rating, weight)
            })
            .collect();

        Ok(UserProfile { user_id, ratings })
    }

    /// Score every catalog item the user has not rated
    fn score_user(&self, user_id: UserId) -> Result<Vec<ScoredItem>> {
        let history = self.data_index.user_history(user_id);
        if history.is_empty() {
            warn!("User {} has no ratings; all scores will be zero", user_id);
        }

        let candidates: Vec<ItemId> = self
            .scorer
            .model()
            .catalog()
            .ids()
            .iter()
            .copied()
            .filter(|&item| !history.contains_key(item))
            .collect();
        debug!(user_id, candidates = candidates.len(), "Scoring candidates");

        self.scorer
            .score(&history, &candidates)
            .with_context(|| format!("Failed to score candidates for user {}", user_id))
    }

    /// Sort by score descending, ties by item id, and keep the top `limit`
    fn rank_and_select(&self, mut scored: Vec<ScoredItem>, limit: usize) -> Vec<ItemRecommendation> {
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.item.cmp(&b.item))
        });
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|ScoredItem { item, score }| ItemRecommendation {
                item_id: item,
                title: self.title_of(item),
                score,
            })
            .collect()
    }

    fn title_of(&self, item: ItemId) -> String {
        self.data_index
            .item_title(item)
            .map_or_else(|| format!("Item {}", item), str::to_string)
    }
}
