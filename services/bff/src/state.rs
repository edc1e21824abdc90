use axum::extract::FromRef;
use sea_orm::DatabaseConnection;
use tower_sessions::cookie::Key;
use url::Url;

use pokedex_auth_types::bearer::JwtSecret;

use crate::infra::catalog::HttpCatalogClient;
use crate::infra::db::{
    DbFavoriteRepository, DbFriendRepository, DbTeamRepository, DbUserRepository,
};
use crate::infra::google::GoogleIdentityProvider;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub catalog: HttpCatalogClient,
    pub google: GoogleIdentityProvider,
    pub jwt_secret: String,
    /// Frontend origin: allowed by CORS and target of sign-in redirects.
    pub frontend_url: Url,
    /// Signs the session cookie.
    pub session_key: Key,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn favorite_repo(&self) -> DbFavoriteRepository {
        DbFavoriteRepository {
            db: self.db.clone(),
        }
    }

    pub fn team_repo(&self) -> DbTeamRepository {
        DbTeamRepository {
            db: self.db.clone(),
        }
    }

    pub fn friend_repo(&self) -> DbFriendRepository {
        DbFriendRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog(&self) -> HttpCatalogClient {
        self.catalog.clone()
    }

    pub fn identity_provider(&self) -> GoogleIdentityProvider {
        self.google.clone()
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}
