//! Persisted user state
//!
//! A small key-value boundary holding three logical keys: the watchlist,
//! the rating list, and the rating-action counter. Reads happen once at
//! startup; writes are fire-and-forget full overwrites after every mutating
//! user action. Missing or malformed saved values degrade to empty state
//! rather than failing the session.

use std::fmt::Display;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;
use crate::models::{CatalogItem, ItemRating, UserState};

mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::{create_redis_client, RedisStore, StoreWriterHandle};

/// Logical keys for persisted user state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Watchlist,
    Ratings,
    RatingCount,
}

impl Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKey::Watchlist => write!(f, "user:watchlist"),
            StateKey::Ratings => write!(f, "user:ratings"),
            StateKey::RatingCount => write!(f, "user:rating_count"),
        }
    }
}

/// Key-value persistence for user state
///
/// `put` is fire-and-forget: there is exactly one logical writer, so last
/// write wins and callers never wait on the write path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStateStore: Send + Sync {
    /// Returns the serialized value for a key, or `None` on first run
    async fn get(&self, key: StateKey) -> AppResult<Option<String>>;

    /// Stores a serialized value without blocking the caller
    fn put(&self, key: StateKey, value: String);
}

/// Startup read of all persisted user state.
///
/// Absent keys are a normal first run; unreadable or malformed values are
/// logged and treated as absent so a corrupted record degrades to "no saved
/// data" instead of blocking the session.
pub async fn load_user_state(store: &dyn UserStateStore) -> UserState {
    UserState {
        watchlist: read_or_default(store, StateKey::Watchlist).await,
        ratings: read_or_default(store, StateKey::Ratings).await,
        rating_count: read_or_default(store, StateKey::RatingCount).await,
    }
}

async fn read_or_default<T>(store: &dyn UserStateStore, key: StateKey) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding malformed saved state");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read saved state");
            T::default()
        }
    }
}

/// Overwrites the persisted watchlist with the full current list
pub fn persist_watchlist(store: &dyn UserStateStore, watchlist: &[CatalogItem]) {
    put_json(store, StateKey::Watchlist, &watchlist);
}

/// Overwrites the persisted rating list and the rating-action counter
pub fn persist_ratings(store: &dyn UserStateStore, ratings: &[ItemRating], rating_count: u64) {
    put_json(store, StateKey::Ratings, &ratings);
    put_json(store, StateKey::RatingCount, &rating_count);
}

fn put_json<T: Serialize>(store: &dyn UserStateStore, key: StateKey, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.put(key, json),
        Err(e) => tracing::error!(key = %key, error = %e, "State serialization error"),
    }
}
