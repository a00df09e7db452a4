use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// A user rating on the 1-5 star scale
///
/// Construction is validated; out-of-range values never enter the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` if the value is outside [1, 5]
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
            .ok_or_else(|| format!("rating must be between 1 and 5, got {}", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Persisted per-item rating record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRating {
    pub id: u32,
    pub rating: Rating,
}

/// Mutable per-user data: watchlist membership and per-item ratings
///
/// Mutated only through [`UserState::toggle_watchlist`] and
/// [`UserState::set_rating`]; the caller persists the full state after
/// every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserState {
    /// Item snapshots marked for later viewing; no duplicate ids
    pub watchlist: Vec<CatalogItem>,
    /// At most one rating per item id
    pub ratings: Vec<ItemRating>,
    /// Total rating actions taken, ever; drives the badge threshold
    pub rating_count: u64,
}

impl UserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_watchlist(&self, id: u32) -> bool {
        self.watchlist.iter().any(|item| item.id == id)
    }

    pub fn rating_for(&self, id: u32) -> Option<Rating> {
        self.ratings.iter().find(|r| r.id == id).map(|r| r.rating)
    }

    /// Flips watchlist membership for an item and returns the new membership.
    ///
    /// Adding stores a snapshot of the item; removing deletes by id.
    pub fn toggle_watchlist(&mut self, item: &CatalogItem) -> bool {
        if self.in_watchlist(item.id) {
            self.watchlist.retain(|entry| entry.id != item.id);
            false
        } else {
            self.watchlist.push(item.clone());
            true
        }
    }

    /// Sets or overwrites the rating for an item.
    ///
    /// The counter tracks rating actions rather than distinct rated items,
    /// so re-rating an item bumps it again.
    pub fn set_rating(&mut self, id: u32, rating: Rating) {
        if let Some(existing) = self.ratings.iter_mut().find(|r| r.id == id) {
            existing.rating = rating;
        } else {
            self.ratings.push(ItemRating { id, rating });
        }
        self.rating_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            genres: vec!["Action".to_string()],
            studio: "Bones".to_string(),
            episodes: 26,
            rating: 8.0,
            mood: "Uplifting".to_string(),
            graphic: false,
            year: 2016,
            source: None,
            streaming_url: None,
            image_url: None,
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(1).is_some());
        assert!(Rating::new(5).is_some());
        assert!(Rating::new(6).is_none());
    }

    #[test]
    fn test_rating_serde_rejects_out_of_range() {
        let parsed: Result<Rating, _> = serde_json::from_str("3");
        assert_eq!(parsed.unwrap().value(), 3);

        let parsed: Result<Rating, _> = serde_json::from_str("9");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_toggle_watchlist_adds_then_removes() {
        let mut state = UserState::new();
        let anime = item(1, "Cowboy Bebop");

        assert!(state.toggle_watchlist(&anime));
        assert!(state.in_watchlist(1));
        assert_eq!(state.watchlist.len(), 1);

        assert!(!state.toggle_watchlist(&anime));
        assert!(!state.in_watchlist(1));
        assert!(state.watchlist.is_empty());
    }

    #[test]
    fn test_toggle_watchlist_never_duplicates() {
        let mut state = UserState::new();
        let anime = item(1, "Cowboy Bebop");

        state.toggle_watchlist(&anime);
        state.toggle_watchlist(&anime);
        state.toggle_watchlist(&anime);
        assert_eq!(state.watchlist.len(), 1);
    }

    #[test]
    fn test_set_rating_overwrites_but_counter_keeps_climbing() {
        let mut state = UserState::new();

        state.set_rating(1, Rating::new(5).unwrap());
        state.set_rating(1, Rating::new(3).unwrap());

        // Final rating is the overwrite; the action counter saw both calls
        assert_eq!(state.rating_for(1).unwrap().value(), 3);
        assert_eq!(state.ratings.len(), 1);
        assert_eq!(state.rating_count, 2);
    }

    #[test]
    fn test_ratings_are_per_item() {
        let mut state = UserState::new();

        state.set_rating(1, Rating::new(4).unwrap());
        state.set_rating(2, Rating::new(2).unwrap());

        assert_eq!(state.rating_for(1).unwrap().value(), 4);
        assert_eq!(state.rating_for(2).unwrap().value(), 2);
        assert_eq!(state.rating_for(3), None);
        assert_eq!(state.rating_count, 2);
    }
}
