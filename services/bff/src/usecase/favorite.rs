use uuid::Uuid;

use crate::domain::repository::FavoriteRepository;
use crate::domain::types::{Favorite, PokemonSummary};
use crate::error::BffError;

// ── ListFavorites ────────────────────────────────────────────────────────────

pub struct ListFavoritesUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> ListFavoritesUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Favorite>, BffError> {
        self.repo.list(user_id).await
    }
}

// ── AddFavorite ──────────────────────────────────────────────────────────────

/// Add a favorite and return the updated list. Re-adding is a no-op.
pub struct AddFavoriteUseCase<R: FavoriteRepository> {
    pub repo: R,
}

impl<R: FavoriteRepository> AddFavoriteUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        pokemon: &PokemonSummary,
    ) -> Result<Vec<Favorite>, BffError> {
        if self.repo.add(user_id, pokemon).await?.is_none() {
            tracing::debug!(%user_id, pokemon_id = pokemon.id, "favorite already present");
        }
        self.repo.list(user_id).await
    }
}
