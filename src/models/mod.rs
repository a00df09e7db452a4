use serde::{Deserialize, Serialize};

mod criteria;
mod user_state;

pub use criteria::{FilterCriteria, LengthBucket, SortMode};
pub use user_state::{ItemRating, Rating, UserState};

/// Streaming platform a catalog item or watch-history entry originates from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    Crunchyroll,
    Netflix,
}

/// A single media entry in the browsable catalog
///
/// Immutable once loaded; user-attached data (rating, watchlist membership)
/// lives in [`UserState`] and is merged in at browse time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique identifier within the catalog
    pub id: u32,
    pub title: String,
    /// Genre tags; order is preserved for display, irrelevant for matching
    pub genres: Vec<String>,
    pub studio: String,
    pub episodes: u32,
    /// Base community rating on a 0-10 scale
    pub rating: f64,
    /// Single mood tag from an open vocabulary (e.g. "Dark", "Uplifting")
    pub mood: String,
    /// Whether the item contains graphic content
    pub graphic: bool,
    pub year: i32,
    #[serde(default)]
    pub source: Option<Platform>,
    #[serde(default)]
    pub streaming_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Externally supplied record of something the user has already watched
///
/// Read-only input to the preference model; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    /// Referenced catalog item id; entries with unknown ids are skipped
    pub id: u32,
    /// Denormalized title copy from the upstream service
    pub title: String,
    pub watched_episodes: u32,
    pub source: Platform,
}

/// Full payload delivered by a catalog source in one shot at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogBundle {
    pub items: Vec<CatalogItem>,
    pub history: Vec<WatchHistoryEntry>,
}

/// A catalog item merged with user annotations and a transient relevance score
///
/// The score is recomputed from current inputs on every browse and is never
/// persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub user_rating: Option<Rating>,
    pub in_watchlist: bool,
    pub relevance: u32,
}

/// Distinct facet values present in the full catalog, for filter controls
///
/// Always derived from the unfiltered catalog so the controls stay stable
/// while filters are active.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Facets {
    pub genres: Vec<String>,
    pub moods: Vec<String>,
    pub studios: Vec<String>,
}
