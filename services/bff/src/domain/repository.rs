#![allow(async_fn_in_trait)]

use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::domain::types::{
    Favorite, Friend, IdentityProfile, PokemonSummary, Team, TeamInput, User,
};
use crate::error::BffError;

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BffError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<User>, BffError>;
    /// Fails with `UserAlreadyExists` when the email is taken and with
    /// `FriendCodeTaken` when only the code is.
    async fn create(&self, user: &User) -> Result<(), BffError>;
}

/// Repository for favorited pokemon.
pub trait FavoriteRepository: Send + Sync {
    /// Oldest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Favorite>, BffError>;

    /// Insert a favorite. Returns `None` when the pokemon was already a favorite.
    async fn add(
        &self,
        user_id: Uuid,
        pokemon: &PokemonSummary,
    ) -> Result<Option<Favorite>, BffError>;

    /// Delete a favorite. Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, pokemon_id: i32) -> Result<bool, BffError>;
}

/// Repository for teams.
///
/// Positional operations address a team by its index in `list` order
/// (created_at descending, id descending on ties).
pub trait TeamRepository: Send + Sync {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Team>, BffError>;
    async fn create(&self, team: &Team) -> Result<(), BffError>;

    /// Returns `None` when `index` is past the end of the list.
    async fn update_at(
        &self,
        user_id: Uuid,
        index: u64,
        data: &TeamInput,
    ) -> Result<Option<Team>, BffError>;

    /// Returns `false` when `index` is past the end of the list.
    async fn delete_at(&self, user_id: Uuid, index: u64) -> Result<bool, BffError>;

    /// Returns `None` when the team does not exist or belongs to someone else.
    async fn update(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        data: &TeamInput,
    ) -> Result<Option<Team>, BffError>;

    async fn delete(&self, user_id: Uuid, team_id: Uuid) -> Result<bool, BffError>;
}

/// Repository for the symmetric friend relation.
pub trait FriendRepository: Send + Sync {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Friend>, BffError>;

    /// Link both directions atomically. Already-linked pairs are left untouched.
    async fn add(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), BffError>;
}

/// Port for the upstream pokemon catalog. Bodies are passed through untouched.
pub trait CatalogPort: Send + Sync {
    async fn get_pokemon(&self, id_or_name: &str) -> Result<Value, BffError>;
    async fn list_pokemon(&self, limit: u32, offset: u32) -> Result<Value, BffError>;
    async fn get_species(&self, id_or_name: &str) -> Result<Value, BffError>;
    async fn get_evolution_chain(&self, id: &str) -> Result<Value, BffError>;
}

/// Port for an OAuth2 identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Authorization URL to send the browser to, and the CSRF state embedded in it.
    fn authorize_url(&self) -> (Url, String);

    /// Exchange an authorization code for the signed-in user's profile.
    async fn fetch_profile(&self, code: &str) -> Result<IdentityProfile, BffError>;
}
