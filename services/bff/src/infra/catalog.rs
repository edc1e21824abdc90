use anyhow::{Context as _, anyhow};
use serde_json::Value;
use url::Url;

use crate::domain::repository::CatalogPort;
use crate::error::BffError;

/// HTTP client for the public pokemon catalog.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BffError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BffError::Catalog(anyhow!("catalog base url cannot be a base")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Value, BffError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))
            .map_err(BffError::Catalog)?;
        // Every upstream failure, 404 included, is a catalog error.
        response
            .error_for_status()
            .with_context(|| format!("GET {url}"))
            .map_err(BffError::Catalog)?
            .json::<Value>()
            .await
            .with_context(|| format!("decode {url}"))
            .map_err(BffError::Catalog)
    }
}

impl CatalogPort for HttpCatalogClient {
    async fn get_pokemon(&self, id_or_name: &str) -> Result<Value, BffError> {
        self.fetch(self.endpoint(&["pokemon", id_or_name])?).await
    }

    async fn list_pokemon(&self, limit: u32, offset: u32) -> Result<Value, BffError> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        self.fetch(url).await
    }

    async fn get_species(&self, id_or_name: &str) -> Result<Value, BffError> {
        self.fetch(self.endpoint(&["pokemon-species", id_or_name])?)
            .await
    }

    async fn get_evolution_chain(&self, id: &str) -> Result<Value, BffError> {
        self.fetch(self.endpoint(&["evolution-chain", id])?).await
    }
}
