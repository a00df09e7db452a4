use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{CatalogItem, UserState, WatchHistoryEntry};
use crate::providers::CatalogProvider;
use crate::store::{self, UserStateStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub store: Arc<dyn UserStateStore>,
}

/// Per-session data: the loaded catalog, the watch history signal, and the
/// user's mutable state
pub struct Session {
    pub catalog: Vec<CatalogItem>,
    pub history: Vec<WatchHistoryEntry>,
    pub user: UserState,
    /// False until the one-shot catalog fetch succeeds; the view renders a
    /// loading/empty state while unset
    pub loaded: bool,
    /// When the catalog fetch completed
    pub loaded_at: Option<DateTime<Utc>>,
}

impl AppState {
    /// Creates state with an empty, unloaded session
    pub fn new(store: Arc<dyn UserStateStore>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session {
                catalog: Vec::new(),
                history: Vec::new(),
                user: UserState::new(),
                loaded: false,
                loaded_at: None,
            })),
            store,
        }
    }

    /// Restores persisted user state; corrupt or missing data loads as empty
    pub async fn restore_user_state(&self) {
        let user = store::load_user_state(self.store.as_ref()).await;
        let mut session = self.session.write().await;
        session.user = user;
    }

    /// Runs the one-shot catalog fetch.
    ///
    /// On failure the session stays empty and unloaded; there is no retry.
    pub async fn load_catalog(&self, provider: &dyn CatalogProvider) {
        match provider.fetch().await {
            Ok(bundle) => {
                let mut session = self.session.write().await;
                session.catalog = bundle.items;
                session.history = bundle.history;
                session.loaded = true;
                session.loaded_at = Some(Utc::now());
                tracing::info!(
                    provider = provider.name(),
                    items = session.catalog.len(),
                    "Session catalog loaded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "Catalog load failed; session stays empty"
                );
            }
        }
    }
}
