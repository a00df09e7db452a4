//! Personalized relevance scoring
//!
//! Derives genre and studio affinity from the user's watch history and
//! scores every catalog item against it. All functions here are pure; the
//! whole pass is cheap enough to re-run on every browse.

use std::collections::{HashMap, HashSet};

use crate::models::{CatalogItem, ScoredItem, UserState, WatchHistoryEntry};

/// Counts how often each genre appears among watched items.
///
/// An item with k genres contributes 1 to each of its k genres, once per
/// history entry referencing it, so rewatches in the history weigh in again.
/// Entries referencing ids absent from the catalog contribute nothing.
pub fn genre_affinity(
    history: &[WatchHistoryEntry],
    catalog: &[CatalogItem],
) -> HashMap<String, u32> {
    let mut affinity = HashMap::new();

    for entry in history {
        let Some(item) = catalog.iter().find(|i| i.id == entry.id) else {
            continue;
        };
        for genre in &item.genres {
            *affinity.entry(genre.clone()).or_insert(0) += 1;
        }
    }

    affinity
}

/// Studios of every watched item that resolves to a catalog entry
pub fn watched_studios<'a>(
    history: &[WatchHistoryEntry],
    catalog: &'a [CatalogItem],
) -> HashSet<&'a str> {
    history
        .iter()
        .filter_map(|entry| catalog.iter().find(|i| i.id == entry.id))
        .map(|item| item.studio.as_str())
        .collect()
}

/// Relevance score for one item: summed genre affinity plus a studio bonus.
///
/// The bonus is 1 when the item's studio matches any watched studio and is
/// capped there no matter how many watched items share it. A watched item
/// scores its own studio like any other.
pub fn relevance_score(
    item: &CatalogItem,
    affinity: &HashMap<String, u32>,
    studios: &HashSet<&str>,
) -> u32 {
    let genre_score: u32 = item
        .genres
        .iter()
        .map(|genre| affinity.get(genre).copied().unwrap_or(0))
        .sum();
    let studio_bonus = u32::from(studios.contains(item.studio.as_str()));

    genre_score + studio_bonus
}

/// Merges user annotations onto the catalog and scores every item.
///
/// With an empty watch history both affinity and watched studios are empty,
/// so every item scores 0 and relevance ordering degenerates to input order.
pub fn score_catalog(
    catalog: &[CatalogItem],
    user: &UserState,
    history: &[WatchHistoryEntry],
) -> Vec<ScoredItem> {
    let affinity = genre_affinity(history, catalog);
    let studios = watched_studios(history, catalog);

    catalog
        .iter()
        .map(|item| ScoredItem {
            user_rating: user.rating_for(item.id),
            in_watchlist: user.in_watchlist(item.id),
            relevance: relevance_score(item, &affinity, &studios),
            item: item.clone(),
        })
        .collect()
}
