use serde_json::{Value, json};

use crate::domain::repository::CatalogPort;
use crate::error::BffError;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Listing or name lookup against the catalog.
#[derive(Debug, Clone, Default)]
pub struct PokemonQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub name: Option<String>,
}

/// Read-through access to the catalog. Upstream bodies are returned untouched.
pub struct CatalogLookupUseCase<C: CatalogPort> {
    pub catalog: C,
}

impl<C: CatalogPort> CatalogLookupUseCase<C> {
    pub async fn pokemon(&self, id_or_name: &str) -> Result<Value, BffError> {
        self.catalog.get_pokemon(id_or_name).await
    }

    /// A non-empty `name` turns the listing into an exact lookup wrapped as a
    /// one-element page.
    pub async fn search(&self, query: PokemonQuery) -> Result<Value, BffError> {
        match query.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                let entity = self.catalog.get_pokemon(&name.to_lowercase()).await?;
                Ok(json!({ "results": [entity], "count": 1 }))
            }
            None => {
                self.catalog
                    .list_pokemon(
                        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
                        query.offset.unwrap_or(0),
                    )
                    .await
            }
        }
    }

    pub async fn species(&self, id_or_name: &str) -> Result<Value, BffError> {
        self.catalog.get_species(id_or_name).await
    }

    pub async fn evolution_chain(&self, id: &str) -> Result<Value, BffError> {
        self.catalog.get_evolution_chain(id).await
    }
}
