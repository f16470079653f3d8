//! Provider traits the core reads its input through.
//!
//! The core never touches files. Whatever loads ratings and genres only has
//! to implement these traits; `DataIndex` does so below.

use crate::vector::SparseVector;
use data_loader::{DataIndex, ItemId, UserId};

/// Per-item rating vectors (user → rating), used for co-rating counts.
pub trait ItemVectorSource {
    /// All ratings the item received, empty when nobody rated it
    fn item_vector(&self, item: ItemId) -> SparseVector;
}

/// Fixed-length genre vectors.
pub trait GenreSource {
    /// Length shared by every genre vector in the catalog
    fn genre_dimensionality(&self) -> usize;

    /// The item's genre vector, `None` when the item has no genre data
    fn item_genres(&self, item: ItemId) -> Option<&[f64]>;
}

/// Per-user rating histories (item → rating).
pub trait HistorySource {
    /// The user's ratings, empty for unknown users
    fn user_history(&self, user: UserId) -> SparseVector;
}

impl ItemVectorSource for DataIndex {
    fn item_vector(&self, item: ItemId) -> SparseVector {
        self.get_item_ratings(item)
            .iter()
            .map(|r| (r.user_id, r.rating))
            .collect()
    }
}

impl GenreSource for DataIndex {
    fn genre_dimensionality(&self) -> usize {
        DataIndex::genre_dimensionality(self)
    }

    fn item_genres(&self, item: ItemId) -> Option<&[f64]> {
        DataIndex::item_genres(self, item)
    }
}

impl HistorySource for DataIndex {
    fn user_history(&self, user: UserId) -> SparseVector {
        self.get_user_ratings(user)
            .iter()
            .map(|r| (r.item_id, r.rating))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;

    #[test]
    fn test_data_index_vectors() {
        let mut index = DataIndex::new();
        for (user_id, item_id, rating) in [(1, 10, 4.0), (2, 10, 2.0), (1, 11, 5.0), (1, 10, 3.0)] {
            index.insert_rating(Rating {
                user_id,
                item_id,
                rating,
                timestamp: 0,
            });
        }

        let item = index.item_vector(10);
        assert_eq!(item.keys(), &[1, 2]);
        // A re-rating replaces the earlier value
        assert_eq!(item.get(1), Some(3.0));

        let history = index.user_history(1);
        assert_eq!(history.keys(), &[10, 11]);
        assert!(index.user_history(99).is_empty());
    }
}
