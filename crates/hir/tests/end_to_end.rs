//! Integration tests for the HIR core.
//!
//! These go from a populated DataIndex through model building to scores,
//! the way the recommendation service uses the crate.

use data_loader::{DataIndex, Item, ItemId, Rating};
use hir::{
    build_model, HistorySource, ItemCatalog, ItemScorer, ModelBuilder, Scorer, ScorerConfig,
};
use std::sync::Arc;

fn create_test_setup() -> DataIndex {
    let mut index = DataIndex::new();

    // Genre columns: Action, Comedy, Drama
    let items = [
        (1, "Heat (1995)", Some(vec![1.0, 0.0, 1.0])),
        (2, "Toy Story (1995)", Some(vec![0.0, 1.0, 0.0])),
        (3, "Casino (1995)", Some(vec![0.0, 0.0, 1.0])),
        (4, "Jumanji (1995)", Some(vec![1.0, 1.0, 0.0])),
        (5, "Unlabelled", None),
    ];
    for (id, title, genres) in items {
        index.insert_item(Item {
            id,
            title: title.to_string(),
            genres,
        });
    }

    // Users 1-3 rate A (1) and B (2); user 4 rates A and C (3)
    for user_id in 1..=3 {
        for item_id in [1, 2] {
            index.insert_rating(Rating {
                user_id,
                item_id,
                rating: 4.0,
                timestamp: 0,
            });
        }
    }
    for item_id in [1, 3] {
        index.insert_rating(Rating {
            user_id: 4,
            item_id,
            rating: 3.0,
            timestamp: 0,
        });
    }

    // User 9 has a single five-star rating on item 1
    index.insert_rating(Rating {
        user_id: 9,
        item_id: 1,
        rating: 5.0,
        timestamp: 0,
    });

    index
}

fn build(index: &DataIndex) -> hir::HirModel {
    build_model(ItemCatalog::new(index.item_ids()), index, index).unwrap()
}

#[test]
fn test_corating_split() {
    let mut index = create_test_setup();
    // Drop user 9 so item 1 is co-rated with item 2 by three users and with
    // item 3 by one
    let mut trimmed = DataIndex::new();
    for id in index.item_ids() {
        if let Some(item) = index.get_item(id) {
            trimmed.insert_item(item.clone());
        }
    }
    for user in index.user_ids().into_iter().filter(|&u| u != 9) {
        for rating in index.get_user_ratings(user) {
            trimmed.insert_rating(*rating);
        }
    }
    index = trimmed;

    let model = build(&index);
    let row = model.coratings_vector(1, &[2, 3]).unwrap();
    assert_eq!(row, vec![0.75, 0.25]);
}

#[test]
fn test_single_rating_user_scores() {
    let index = create_test_setup();
    let model = Arc::new(build(&index));
    let scorer = Scorer::new(model.clone(), ScorerConfig::new(0.3, 0.2)).unwrap();

    let history = index.user_history(9);
    let candidates: Vec<ItemId> = model
        .catalog()
        .ids()
        .iter()
        .copied()
        .filter(|item| !history.contains_key(*item))
        .collect();

    let results = scorer.score(&history, &candidates).unwrap();
    let coratings = model.coratings_vector(1, &candidates).unwrap();
    let proximity = model.proximity_vector(1, &candidates).unwrap();

    assert_eq!(results.len(), candidates.len());
    for (i, result) in results.iter().enumerate() {
        let expected = 0.3 * coratings[i] + 0.2 * proximity[i];
        assert_eq!(result.item, candidates[i]);
        assert!((result.score - expected).abs() < 1e-12);
    }

    // The unlabelled, unrated item gets nothing from either signal
    let unlabelled = results.iter().find(|r| r.item == 5).unwrap();
    assert_eq!(unlabelled.score, 0.0);
}

#[test]
fn test_item_without_genres() {
    let index = create_test_setup();
    let model = build(&index);

    let all = model.catalog().ids().to_vec();
    assert_eq!(model.proximity_vector(5, &all).unwrap(), vec![0.0; all.len()]);
    assert_eq!(model.row_factor().row_l1_norm(4), 0.0);
}

#[test]
fn test_rebuild_is_identical() {
    let index = create_test_setup();
    let first = build(&index);
    let second = ModelBuilder::new(ItemCatalog::new(index.item_ids()), &index, &index)
        .build()
        .unwrap();

    assert_eq!(first.direct_association(), second.direct_association());
    assert_eq!(first.row_factor(), second.row_factor());
    assert_eq!(first.column_factor(), second.column_factor());
}

#[test]
fn test_concurrent_scoring_on_shared_model() {
    let index = Arc::new(create_test_setup());
    let model = Arc::new(build(&index));
    let scorer = Scorer::new(model, ScorerConfig::default()).unwrap();

    let handles: Vec<_> = index
        .user_ids()
        .into_iter()
        .map(|user| {
            let scorer = scorer.clone();
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                let history = index.user_history(user);
                let candidates: Vec<ItemId> = index.item_ids();
                scorer.score(&history, &candidates).map(|r| r.len())
            })
        })
        .collect();

    for handle in handles {
        let scored = handle.join().unwrap().unwrap();
        assert!(scored <= 5);
    }
}
