/// Favorites set
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::TrackId;

/// Set of favorite track ids
///
/// Persisted as a plain JSON array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet(BTreeSet<TrackId>);

impl FavoritesSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership
    pub fn contains(&self, id: &TrackId) -> bool {
        self.0.contains(id)
    }

    /// Flip membership, returning the new membership
    pub fn toggle(&mut self, id: &TrackId) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate ids in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.0.iter()
    }
}

impl FromIterator<TrackId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = TrackId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
