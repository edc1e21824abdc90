use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::error::BffError;
use crate::state::AppState;
use crate::usecase::catalog::{CatalogLookupUseCase, PokemonQuery};

#[derive(Debug, Default, Deserialize)]
pub struct PokemonListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub name: Option<String>,
}

// ── GET /api/pokemon/{id} ────────────────────────────────────────────────────

pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BffError> {
    let uc = CatalogLookupUseCase {
        catalog: state.catalog(),
    };
    Ok(Json(uc.pokemon(&id).await?))
}

// ── GET /api/pokemon ─────────────────────────────────────────────────────────

pub async fn list_pokemon(
    State(state): State<AppState>,
    Query(query): Query<PokemonListQuery>,
) -> Result<Json<Value>, BffError> {
    let uc = CatalogLookupUseCase {
        catalog: state.catalog(),
    };
    let page = uc
        .search(PokemonQuery {
            limit: query.limit,
            offset: query.offset,
            name: query.name,
        })
        .await?;
    Ok(Json(page))
}

// ── GET /api/pokemon-species/{id} ────────────────────────────────────────────

pub async fn get_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BffError> {
    let uc = CatalogLookupUseCase {
        catalog: state.catalog(),
    };
    Ok(Json(uc.species(&id).await?))
}

// ── GET /api/pokemon-evolution/{id} ──────────────────────────────────────────

pub async fn get_evolution_chain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, BffError> {
    let uc = CatalogLookupUseCase {
        catalog: state.catalog(),
    };
    Ok(Json(uc.evolution_chain(&id).await?))
}
