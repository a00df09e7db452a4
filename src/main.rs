use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use otaku_guide_api::api::{create_router, AppState};
use otaku_guide_api::config::Config;
use otaku_guide_api::providers::{BundledCatalogProvider, CatalogProvider, HttpCatalogProvider};
use otaku_guide_api::store::{create_redis_client, RedisStore, UserStateStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (redis_store, writer_handle) = RedisStore::new(redis_client).await;
    let store: Arc<dyn UserStateStore> = Arc::new(redis_store);

    let provider: Box<dyn CatalogProvider> = match &config.catalog_url {
        Some(url) => Box::new(HttpCatalogProvider::new(url.clone())),
        None => Box::new(BundledCatalogProvider::new()),
    };

    let state = AppState::new(store);
    state.restore_user_state().await;
    state.load_catalog(provider.as_ref()).await;

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "otaku-guide-api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush any queued user state writes before exiting
    writer_handle.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
