use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AppResult;

use super::{StateKey, UserStateStore};

/// In-memory user state store for tests and redis-less runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized value for a key, for inspecting persisted state
    pub fn value(&self, key: StateKey) -> Option<String> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(&key.to_string())
            .cloned()
    }
}

#[async_trait]
impl UserStateStore for MemoryStore {
    async fn get(&self, key: StateKey) -> AppResult<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("store mutex poisoned")
            .get(&key.to_string())
            .cloned())
    }

    fn put(&self, key: StateKey, value: String) {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.put(StateKey::RatingCount, "1".to_string());
        store.put(StateKey::RatingCount, "2".to_string());

        let value = tokio_test::block_on(store.get(StateKey::RatingCount)).unwrap();
        assert_eq!(value, Some("2".to_string()));
    }

    #[test]
    fn test_missing_key_reads_as_none() {
        let store = MemoryStore::new();
        let value = tokio_test::block_on(store.get(StateKey::Watchlist)).unwrap();
        assert_eq!(value, None);
    }
}
