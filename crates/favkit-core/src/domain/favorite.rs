//! Favorite identifiers and the ordered favorite set.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ports::CoreError;

/// Opaque identifier of a favorited resource.
///
/// In practice this is the URL the record is fetched from, but the core never
/// interprets it beyond [`FavoriteId::looks_like_url`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(String);

impl FavoriteId {
    /// Create an identifier, trimming surrounding whitespace.
    ///
    /// Empty or whitespace-only input is rejected.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CoreError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "favorite id cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is an absolute `http(s)` URL.
    #[must_use]
    pub fn looks_like_url(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Consume the identifier and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FavoriteId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FavoriteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered set of favorited identifiers.
///
/// Iteration order is insertion order. Removing an id keeps the relative
/// order of the remaining ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: IndexSet<FavoriteId>,
}

impl FavoriteSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id at the end. Returns `false` if it was already present.
    pub fn insert(&mut self, id: FavoriteId) -> bool {
        self.ids.insert(id)
    }

    /// Remove an id. Returns `false` if it was not present.
    pub fn remove(&mut self, id: &FavoriteId) -> bool {
        self.ids.shift_remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &FavoriteId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Iterate ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FavoriteId> {
        self.ids.iter()
    }

    /// Collect the ids into a vector, preserving order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<FavoriteId> {
        self.ids.iter().cloned().collect()
    }
}

impl FromIterator<FavoriteId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = FavoriteId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FavoriteSet {
    type Item = FavoriteId;
    type IntoIter = indexmap::set::IntoIter<FavoriteId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = &'a FavoriteId;
    type IntoIter = indexmap::set::Iter<'a, FavoriteId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
