//! Catalog data sources
//!
//! The catalog and watch history arrive in a single one-shot fetch at
//! startup; there are no retries and no partial loads. Sources must be
//! stable within a session.

use crate::{error::AppResult, models::CatalogBundle};

mod bundled;
mod http;

pub use bundled::BundledCatalogProvider;
pub use http::HttpCatalogProvider;

/// Trait for catalog data sources
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches the full catalog and watch history
    async fn fetch(&self) -> AppResult<CatalogBundle>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
