use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{
    CatalogItem, Facets, FilterCriteria, LengthBucket, Rating, ScoredItem, SortMode,
    WatchHistoryEntry,
};
use crate::services::browse;
use crate::store;

use super::AppState;

/// Rating actions required for the Otaku badge
const BADGE_THRESHOLD: u64 = 5;

// Request/Response types

/// Browse query parameters; every facet is optional
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub search: Option<String>,
    /// Comma-separated genre list, e.g. `genres=Action,Fantasy`
    pub genres: Option<String>,
    pub mood: Option<String>,
    pub studio: Option<String>,
    pub graphic_only: Option<bool>,
    pub length: Option<LengthBucket>,
    pub sort: Option<SortMode>,
}

impl BrowseQuery {
    fn into_parts(self) -> (FilterCriteria, SortMode) {
        let genres = self
            .genres
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        let criteria = FilterCriteria {
            search: self.search.unwrap_or_default(),
            genres,
            mood: self.mood,
            studio: self.studio,
            graphic_only: self.graphic_only.unwrap_or(false),
            length: self.length,
        };

        (criteria, self.sort.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    /// False while the catalog has not loaded; items will be empty
    pub loaded: bool,
    /// When the catalog fetch completed, if it has
    pub as_of: Option<chrono::DateTime<chrono::Utc>>,
    pub items: Vec<ScoredItem>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleWatchlistRequest {
    pub id: u32,
}

#[derive(Debug, Serialize)]
pub struct ToggleWatchlistResponse {
    pub id: u32,
    pub in_watchlist: bool,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub id: u32,
    pub rating: u8,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub id: u32,
    pub rating: u8,
    pub rating_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub rating_count: u64,
    pub badge_earned: bool,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// The filtered, sorted, scored catalog view
///
/// Recomputes the whole pipeline from current inputs on every request.
pub async fn browse_catalog(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Json<BrowseResponse> {
    let (criteria, sort) = query.into_parts();
    let session = state.session.read().await;

    let items = browse::browse(
        &session.catalog,
        &session.user,
        &session.history,
        &criteria,
        sort,
    );

    Json(BrowseResponse {
        loaded: session.loaded,
        as_of: session.loaded_at,
        items,
    })
}

/// Distinct facet values of the full catalog, for filter controls
pub async fn get_facets(State(state): State<AppState>) -> Json<Facets> {
    let session = state.session.read().await;
    Json(browse::facets(&session.catalog))
}

/// The user's current watchlist
pub async fn get_watchlist(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    let session = state.session.read().await;
    Json(session.user.watchlist.clone())
}

/// The externally supplied watch history
pub async fn get_history(State(state): State<AppState>) -> Json<Vec<WatchHistoryEntry>> {
    let session = state.session.read().await;
    Json(session.history.clone())
}

/// Flips watchlist membership for a catalog item and persists the result
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Json(request): Json<ToggleWatchlistRequest>,
) -> AppResult<Json<ToggleWatchlistResponse>> {
    let mut session = state.session.write().await;

    let item = session
        .catalog
        .iter()
        .find(|i| i.id == request.id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("no catalog item with id {}", request.id)))?;

    let in_watchlist = session.user.toggle_watchlist(&item);
    store::persist_watchlist(state.store.as_ref(), &session.user.watchlist);

    tracing::debug!(id = request.id, in_watchlist, "Watchlist toggled");

    Ok(Json(ToggleWatchlistResponse {
        id: request.id,
        in_watchlist,
    }))
}

/// Sets or overwrites the user's rating for a catalog item
pub async fn rate_item(
    State(state): State<AppState>,
    Json(request): Json<RateRequest>,
) -> AppResult<Json<RateResponse>> {
    let rating = Rating::new(request.rating).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "rating must be between 1 and 5, got {}",
            request.rating
        ))
    })?;

    let mut session = state.session.write().await;

    if !session.catalog.iter().any(|i| i.id == request.id) {
        return Err(AppError::NotFound(format!(
            "no catalog item with id {}",
            request.id
        )));
    }

    session.user.set_rating(request.id, rating);
    store::persist_ratings(
        state.store.as_ref(),
        &session.user.ratings,
        session.user.rating_count,
    );

    tracing::debug!(
        id = request.id,
        rating = rating.value(),
        rating_count = session.user.rating_count,
        "Item rated"
    );

    Ok(Json(RateResponse {
        id: request.id,
        rating: rating.value(),
        rating_count: session.user.rating_count,
    }))
}

/// Rating-count summary and badge status
pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let session = state.session.read().await;
    Json(ProfileResponse {
        rating_count: session.user.rating_count,
        badge_earned: session.user.rating_count >= BADGE_THRESHOLD,
    })
}
