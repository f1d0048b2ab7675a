//! Filtered view of the favorite set.
//!
//! Pure functions over a favorite set, a hydration snapshot and a search
//! term. Output order follows the favorite set.

use serde::Serialize;

use super::hydration::HydrationSnapshot;
use crate::domain::{FavoriteId, FavoriteSet, HydrationState};

/// One rendered row: an id plus what the cache knows about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub id: FavoriteId,
    /// Ids the cache has not seen yet render as Pending.
    pub state: HydrationState,
}

/// Ids to render for `term`.
///
/// An empty term keeps every id. Otherwise only ids with a Ready record whose
/// title contains `term` (ignoring case) are kept.
#[must_use]
pub fn project(favorites: &FavoriteSet, snapshot: &HydrationSnapshot, term: &str) -> Vec<FavoriteId> {
    let needle = term.to_lowercase();
    favorites
        .iter()
        .filter(|id| matches(snapshot.get(id), &needle))
        .cloned()
        .collect()
}

/// Like [`project`], with each id paired with its hydration state.
#[must_use]
pub fn project_rows(favorites: &FavoriteSet, snapshot: &HydrationSnapshot, term: &str) -> Vec<ViewRow> {
    let needle = term.to_lowercase();
    favorites
        .iter()
        .filter_map(|id| {
            let state = snapshot.get(id);
            matches(state, &needle).then(|| ViewRow {
                id: id.clone(),
                state: state.cloned().unwrap_or(HydrationState::Pending),
            })
        })
        .collect()
}

fn matches(state: Option<&HydrationState>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    state
        .and_then(HydrationState::record)
        .is_some_and(|record| record.title_contains(needle))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Record;

    fn id(s: &str) -> FavoriteId {
        FavoriteId::new(s).unwrap()
    }

    fn ready(title: &str) -> HydrationState {
        HydrationState::Ready {
            record: Arc::new(Record::new(title)),
        }
    }

    fn fixture() -> (FavoriteSet, HydrationSnapshot) {
        let favorites: FavoriteSet = [id("A"), id("B"), id("C"), id("D")].into_iter().collect();
        let snapshot: HydrationSnapshot = [
            (id("A"), ready("Dragon Ball")),
            (id("B"), ready("One Piece")),
            (
                id("C"),
                HydrationState::Failed {
                    reason: "status 404".to_string(),
                },
            ),
        ]
        .into_iter()
        .collect();
        (favorites, snapshot)
    }

    #[test]
    fn test_search_matches_title_case_insensitively() {
        let (favorites, snapshot) = fixture();
        assert_eq!(project(&favorites, &snapshot, "dragon"), vec![id("A")]);
        assert_eq!(project(&favorites, &snapshot, "PIECE"), vec![id("B")]);
        assert!(project(&favorites, &snapshot, "naruto").is_empty());
    }

    #[test]
    fn test_empty_term_keeps_every_id_in_set_order() {
        let (favorites, snapshot) = fixture();
        assert_eq!(
            project(&favorites, &snapshot, ""),
            vec![id("A"), id("B"), id("C"), id("D")]
        );
    }

    #[test]
    fn test_unresolved_ids_never_match_a_search() {
        let (favorites, snapshot) = fixture();
        // "status" appears in C's failure reason, D has no entry at all
        assert!(project(&favorites, &snapshot, "status").is_empty());
        assert!(project(&favorites, &snapshot, "d").contains(&id("A")));
        assert!(!project(&favorites, &snapshot, "d").contains(&id("D")));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let (favorites, snapshot) = fixture();
        for term in ["", "o", "one", "x"] {
            assert_eq!(
                project(&favorites, &snapshot, term),
                project(&favorites, &snapshot, term)
            );
        }
    }

    #[test]
    fn test_rows_default_missing_entries_to_pending() {
        let (favorites, snapshot) = fixture();
        let rows = project_rows(&favorites, &snapshot, "");

        assert_eq!(rows.len(), 4);
        assert!(rows[0].state.is_ready());
        assert!(rows[2].state.is_failed());
        assert_eq!(rows[3].state, HydrationState::Pending);

        let ids: Vec<FavoriteId> = rows.into_iter().map(|row| row.id).collect();
        assert_eq!(ids, project(&favorites, &snapshot, ""));
    }
}
