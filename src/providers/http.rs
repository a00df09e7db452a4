use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::CatalogBundle,
};

use super::CatalogProvider;

/// Fetches the catalog bundle from a remote JSON document
pub struct HttpCatalogProvider {
    http_client: HttpClient,
    url: String,
}

impl HttpCatalogProvider {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for HttpCatalogProvider {
    async fn fetch(&self) -> AppResult<CatalogBundle> {
        tracing::debug!(url = %self.url, "Fetching catalog document");

        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "Catalog source request failed");
            return Err(AppError::CatalogSource(format!(
                "catalog source returned status {}: {}",
                status, body
            )));
        }

        let bundle: CatalogBundle = response.json().await?;

        tracing::info!(
            items = bundle.items.len(),
            history = bundle.history.len(),
            "Catalog loaded"
        );

        Ok(bundle)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
