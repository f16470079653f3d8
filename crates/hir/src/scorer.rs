//! Blends preferences, direct association and proximity into item scores.
//!
//! ## Algorithm
//! 1. Normalize the user's ratings into a preference vector over the catalog
//!    (left all zero when the ratings sum to 0)
//! 2. Start the ranking at `preference * (1 - direct - proximity)`
//! 3. For every item k with preference weight w ≠ 0, add
//!    `w * (direct * coratings(k) + proximity * proximity(k))`
//! 4. Report every candidate the user has not rated, in candidate order
//!
//! Ordering and top-k selection are left to the caller.

use crate::config::ScorerConfig;
use crate::error::Result;
use crate::model::HirModel;
use crate::vector::SparseVector;
use data_loader::ItemId;
use ndarray::Array1;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A candidate item and its blended score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub item: ItemId,
    pub score: f64,
}

/// Capability interface for scoring strategies.
///
/// `Send + Sync` so one scorer can serve concurrent requests.
pub trait ItemScorer: Send + Sync {
    /// Name of this scorer (for logging)
    fn name(&self) -> &str;

    /// Score `candidates` for a user with the given rating history.
    fn score(&self, history: &SparseVector, candidates: &[ItemId]) -> Result<Vec<ScoredItem>>;
}

/// Scores candidates against a shared [`HirModel`].
#[derive(Debug, Clone)]
pub struct Scorer {
    model: Arc<HirModel>,
    config: ScorerConfig,
}

impl Scorer {
    /// Create a scorer, rejecting invalid blend weights.
    pub fn new(model: Arc<HirModel>, config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { model, config })
    }

    pub fn model(&self) -> &HirModel {
        &self.model
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// The user's ratings divided by their total, over the whole catalog.
    pub fn preference_vector(&self, history: &SparseVector) -> Result<Array1<f64>> {
        preference_vector(&self.model, history)
    }
}

impl ItemScorer for Scorer {
    fn name(&self) -> &str {
        "HirScorer"
    }

    #[instrument(
        skip_all,
        fields(scorer = self.name(), history = history.len(), candidates = candidates.len())
    )]
    fn score(&self, history: &SparseVector, candidates: &[ItemId]) -> Result<Vec<ScoredItem>> {
        rank(&self.model, &self.config, history, candidates)
    }
}

/// Score `candidates` in one call with explicit weights.
///
/// Fails on invalid weights, or when a candidate or rated item is outside the
/// model's catalog.
pub fn score(
    model: &HirModel,
    history: &SparseVector,
    candidates: &[ItemId],
    direct_association: f64,
    proximity: f64,
) -> Result<Vec<ScoredItem>> {
    let config = ScorerConfig::new(direct_association, proximity);
    config.validate()?;
    rank(model, &config, history, candidates)
}

fn preference_vector(model: &HirModel, history: &SparseVector) -> Result<Array1<f64>> {
    let catalog = model.catalog();
    let mut preferences = Array1::zeros(catalog.len());

    for (item, rating) in history.iter() {
        preferences[catalog.require_index(item)?] = rating;
    }

    let total = history.sum();
    if total != 0.0 {
        preferences.mapv_inplace(|w| w / total);
    }
    Ok(preferences)
}

fn rank(
    model: &HirModel,
    config: &ScorerConfig,
    history: &SparseVector,
    candidates: &[ItemId],
) -> Result<Vec<ScoredItem>> {
    let positions = model.catalog().require_indices(candidates)?;
    let preferences = preference_vector(model, history)?;

    let residual = config.residual_weight();
    let mut ranking: Vec<f64> = positions
        .iter()
        .map(|&pos| preferences[pos] * residual)
        .collect();

    let mut contributors = 0;
    for (row, &weight) in preferences.iter().enumerate() {
        if weight == 0.0 {
            continue;
        }
        contributors += 1;

        let coratings = model.direct_row(row);
        let proximity = model.proximity_row(row);
        for (slot, &pos) in ranking.iter_mut().zip(&positions) {
            *slot += weight
                * (config.direct_association * coratings[pos] + config.proximity * proximity[pos]);
        }
    }
    debug!(contributors, "Blended preference rows into ranking");

    Ok(candidates
        .iter()
        .zip(ranking)
        .filter(|(item, _)| !history.contains_key(**item))
        .map(|(&item, score)| ScoredItem { item, score })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_model;
    use crate::catalog::ItemCatalog;
    use crate::error::HirError;
    use data_loader::{DataIndex, Item, Rating};

    fn create_test_index() -> DataIndex {
        let mut index = DataIndex::new();

        let genres = [
            (1, vec![1.0, 0.0, 1.0]),
            (2, vec![1.0, 1.0, 0.0]),
            (3, vec![0.0, 1.0, 0.0]),
            (4, vec![0.0, 0.0, 1.0]),
            (5, vec![1.0, 0.0, 0.0]),
        ];
        for (id, genres) in genres {
            index.insert_item(Item {
                id,
                title: format!("Item {}", id),
                genres: Some(genres),
            });
        }

        let ratings = [
            (1, 1, 5.0),
            (1, 2, 3.0),
            (2, 1, 4.0),
            (2, 3, 2.0),
            (2, 4, 5.0),
            (3, 2, 4.0),
            (3, 5, 1.0),
            (4, 1, 2.0),
            (4, 5, 4.0),
        ];
        for (user_id, item_id, rating) in ratings {
            index.insert_rating(Rating {
                user_id,
                item_id,
                rating,
                timestamp: 0,
            });
        }
        index
    }

    fn create_test_model() -> Arc<HirModel> {
        let index = create_test_index();
        Arc::new(build_model(ItemCatalog::new(index.item_ids()), &index, &index).unwrap())
    }

    #[test]
    fn test_preference_vector_normalizes_ratings() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::default()).unwrap();
        let history = SparseVector::from_pairs([(1, 3.0), (4, 1.0)]);

        let preferences = scorer.preference_vector(&history).unwrap();
        assert_eq!(preferences.to_vec(), vec![0.75, 0.0, 0.0, 0.25, 0.0]);
    }

    #[test]
    fn test_single_rating_user() {
        let model = create_test_model();
        let scorer = Scorer::new(model.clone(), ScorerConfig::new(0.3, 0.2)).unwrap();
        let history = SparseVector::from_pairs([(1, 5.0)]);
        let candidates = [2, 3, 4, 5];

        let results = scorer.score(&history, &candidates).unwrap();

        let coratings = model.coratings_vector(1, &candidates).unwrap();
        let proximity = model.proximity_vector(1, &candidates).unwrap();
        assert_eq!(results.len(), candidates.len());
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.item, candidates[i]);
            let expected = 0.3 * coratings[i] + 0.2 * proximity[i];
            assert!((result.score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rated_candidates_are_excluded() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::default()).unwrap();
        let history = SparseVector::from_pairs([(1, 5.0), (2, 3.0)]);

        let results = scorer.score(&history, &[1, 2, 3, 4, 5]).unwrap();
        let items: Vec<ItemId> = results.iter().map(|r| r.item).collect();
        assert_eq!(items, vec![3, 4, 5]);
    }

    #[test]
    fn test_residual_weight_carries_preferences() {
        // With both weights at zero only the residual preference remains,
        // which is zero for every unrated candidate
        let model = create_test_model();
        let history = SparseVector::from_pairs([(1, 5.0)]);

        let results = score(&model, &history, &[2, 3], 0.0, 0.0).unwrap();
        assert!(results.iter().all(|r| r.score == 0.0));

        let preferences = preference_vector(&model, &history).unwrap();
        assert_eq!(preferences[0], 1.0);
    }

    #[test]
    fn test_empty_history_scores_zero() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::new(0.6, 0.4)).unwrap();
        let results = scorer.score(&SparseVector::new(), &[1, 2, 3, 4, 5]).unwrap();

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_zero_total_rating_leaves_preferences_zero() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::default()).unwrap();
        let history = SparseVector::from_pairs([(1, 0.0)]);

        let preferences = scorer.preference_vector(&history).unwrap();
        assert!(preferences.iter().all(|&w| w == 0.0));
        let results = scorer.score(&history, &[2, 3]).unwrap();
        assert!(results.iter().all(|r| r.score == 0.0 && r.score.is_finite()));
    }

    #[test]
    fn test_ranking_mass_when_weights_sum_to_one() {
        // Both signals are row stochastic, so with direct + proximity = 1 the
        // whole catalog receives mass 1; only the rated item's own proximity
        // share is dropped from the output
        let model = create_test_model();
        let history = SparseVector::from_pairs([(3, 2.0)]);
        let all: Vec<ItemId> = model.catalog().ids().to_vec();

        let results = score(&model, &history, &all, 0.5, 0.5).unwrap();
        let total: f64 = results.iter().map(|r| r.score).sum();
        let self_proximity = model.proximity_vector(3, &[3]).unwrap()[0];
        assert!((total - (1.0 - 0.5 * self_proximity)).abs() < 1e-9, "total was {}", total);
    }

    #[test]
    fn test_unknown_candidate() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::default()).unwrap();
        let history = SparseVector::from_pairs([(1, 5.0)]);
        assert_eq!(
            scorer.score(&history, &[2, 77]),
            Err(HirError::UnknownItem { item: 77 })
        );
    }

    #[test]
    fn test_invalid_weights_rejected_at_boundary() {
        let model = create_test_model();
        assert!(matches!(
            Scorer::new(model.clone(), ScorerConfig::new(0.9, 0.3)),
            Err(HirError::InvalidWeights { .. })
        ));
        assert!(matches!(
            score(&model, &SparseVector::new(), &[1], 0.9, 0.3),
            Err(HirError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_scorer_name() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::default()).unwrap();
        let as_trait: &dyn ItemScorer = &scorer;
        assert_eq!(as_trait.name(), "HirScorer");
    }

    #[test]
    fn test_scorer_is_shareable_across_threads() {
        let scorer = Scorer::new(create_test_model(), ScorerConfig::default()).unwrap();
        let history = SparseVector::from_pairs([(1, 5.0), (4, 2.0)]);
        let expected = scorer.score(&history, &[2, 3, 5]).unwrap();

        let (scorer, history) = (&scorer, &history);
        std::thread::scope(|s| {
            let mut handles = Vec::new();
            for _ in 0..4 {
                handles.push(s.spawn(move || scorer.score(history, &[2, 3, 5]).unwrap()));
            }
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
