use axum::http::{HeaderValue, Method, header};
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use pokedex_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, logout, register},
    battle::simulate_battle,
    favorite::{add_favorite, get_favorites},
    friend::{add_friend, get_friends},
    health::{healthz, readyz, root},
    oauth::{google_callback, google_login},
    pokemon::{get_evolution_chain, get_pokemon, get_species, list_pokemon},
    team::{
        create_team, delete_team_at, delete_team_by_id, get_teams, update_team_at,
        update_team_by_id,
    },
};
use crate::state::AppState;

/// Idle time after which a login session cookie lapses.
///
/// `MemoryStore` never serves an expired record but only drops records that
/// are flushed, so abandoned sign-ins stay in memory until restart.
pub const SESSION_IDLE_MINUTES: i64 = 30;

pub fn build_router(state: AppState) -> Router {
    // Lax so the cookie survives the top-level redirect back from the provider.
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(SESSION_IDLE_MINUTES)))
        .with_signed(state.session_key.clone());

    let origin = HeaderValue::from_str(&state.frontend_url.origin().ascii_serialization()).ok();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origin))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        // Health
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .route("/auth/google", get(google_login))
        .route("/auth/google/callback", get(google_callback))
        // Catalog
        .route("/api/pokemon", get(list_pokemon))
        .route("/api/pokemon/{id}", get(get_pokemon))
        .route("/api/pokemon-species/{id}", get(get_species))
        .route("/api/pokemon-evolution/{id}", get(get_evolution_chain))
        // Favorites
        .route("/api/favorites", get(get_favorites).post(add_favorite))
        // Teams
        .route("/api/teams", get(get_teams).post(create_team))
        .route("/api/teams/{idx}", put(update_team_at).delete(delete_team_at))
        .route(
            "/api/teams/id/{team_id}",
            put(update_team_by_id).delete(delete_team_by_id),
        )
        // Friends
        .route("/api/friends", get(get_friends))
        .route("/api/friends/add", post(add_friend))
        // Battle
        .route("/api/battle/simulate", post(simulate_battle))
        .layer(sessions)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
