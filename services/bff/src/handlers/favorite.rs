use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Favorite, PokemonSummary};
use crate::error::BffError;
use crate::handlers::caller::Caller;
use crate::state::AppState;
use crate::usecase::favorite::{AddFavoriteUseCase, ListFavoritesUseCase};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddFavoriteRequest {
    pub pokemon: Option<PokemonSummary>,
}

#[derive(Serialize)]
pub struct FavoriteResponse {
    pub id: i32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    #[serde(serialize_with = "pokedex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(f: Favorite) -> Self {
        Self {
            id: f.pokemon_id,
            name: f.name,
            sprite: f.sprite,
            types: f.types,
            created_at: f.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteResponse>,
}

impl From<Vec<Favorite>> for FavoritesResponse {
    fn from(favorites: Vec<Favorite>) -> Self {
        Self {
            favorites: favorites.into_iter().map(FavoriteResponse::from).collect(),
        }
    }
}

// ── GET /api/favorites ───────────────────────────────────────────────────────

pub async fn get_favorites(
    Caller(user): Caller,
    State(state): State<AppState>,
) -> Result<Json<FavoritesResponse>, BffError> {
    let uc = ListFavoritesUseCase {
        repo: state.favorite_repo(),
    };
    Ok(Json(uc.execute(user.id).await?.into()))
}

// ── POST /api/favorites ──────────────────────────────────────────────────────

pub async fn add_favorite(
    Caller(user): Caller,
    State(state): State<AppState>,
    Json(body): Json<AddFavoriteRequest>,
) -> Result<Json<FavoritesResponse>, BffError> {
    let pokemon = body.pokemon.ok_or(BffError::MissingData("pokemon"))?;
    let uc = AddFavoriteUseCase {
        repo: state.favorite_repo(),
    };
    Ok(Json(uc.execute(user.id, &pokemon).await?.into()))
}
