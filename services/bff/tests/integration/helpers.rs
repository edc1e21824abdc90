#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use httpmock::MockServer;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

use pokedex_bff::config::GoogleSettings;
use pokedex_bff::domain::repository::{
    CatalogPort, FavoriteRepository, FriendRepository, IdentityProvider, TeamRepository,
    UserRepository,
};
use pokedex_bff::domain::types::{
    Favorite, Friend, IdentityProfile, PokemonSummary, Team, TeamInput, User,
};
use pokedex_bff::error::BffError;
use pokedex_bff::infra::catalog::HttpCatalogClient;
use pokedex_bff::infra::google::GoogleIdentityProvider;
use pokedex_bff::infra::session::signing_key;
use pokedex_bff::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str, code: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        name: email.split('@').next().unwrap_or_default().to_owned(),
        password_hash: bcrypt::hash("hunter2", 4).unwrap(),
        code: code.to_owned(),
        created_at: Utc::now(),
    }
}

pub fn oauth_user(email: &str, code: &str) -> User {
    User {
        password_hash: String::new(),
        ..test_user(email, code)
    }
}

pub fn pokemon(id: i32, name: &str) -> PokemonSummary {
    PokemonSummary {
        id,
        name: name.to_owned(),
        sprite: Some(format!("https://img.example/{id}.png")),
        types: vec!["electric".to_owned()],
        extra: serde_json::Map::new(),
    }
}

/// A team member shaped like a PokeAPI pokemon resource.
pub fn member(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "types": [{ "slot": 1, "type": { "name": "electric" } }],
    })
}

pub fn team_input(name: &str, pokemons: Vec<Value>) -> TeamInput {
    TeamInput {
        name: name.to_owned(),
        pokemons,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    /// Number of upcoming `create` calls that lose a friend-code race.
    pub code_races: Arc<Mutex<usize>>,
    pub create_attempts: Arc<Mutex<usize>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            ..Self::default()
        }
    }

    pub fn losing_code_races(races: usize) -> Self {
        Self {
            code_races: Arc::new(Mutex::new(races)),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn find(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, BffError> {
        Ok(self.find(email))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<User>, BffError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.code == code)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), BffError> {
        *self.create_attempts.lock().unwrap() += 1;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(BffError::UserAlreadyExists);
        }
        let mut races = self.code_races.lock().unwrap();
        if *races > 0 || users.iter().any(|u| u.code == user.code) {
            *races = races.saturating_sub(1);
            return Err(BffError::FriendCodeTaken);
        }
        users.push(user.clone());
        Ok(())
    }
}

// ── MockFavoriteRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockFavoriteRepo {
    pub favorites: Arc<Mutex<Vec<Favorite>>>,
}

impl FavoriteRepository for MockFavoriteRepo {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Favorite>, BffError> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add(
        &self,
        user_id: Uuid,
        pokemon: &PokemonSummary,
    ) -> Result<Option<Favorite>, BffError> {
        let mut favorites = self.favorites.lock().unwrap();
        if favorites
            .iter()
            .any(|f| f.user_id == user_id && f.pokemon_id == pokemon.id)
        {
            return Ok(None);
        }
        let favorite = Favorite {
            user_id,
            pokemon_id: pokemon.id,
            name: pokemon.name.clone(),
            sprite: pokemon.sprite.clone(),
            types: pokemon.types.clone(),
            created_at: Utc::now(),
        };
        favorites.push(favorite.clone());
        Ok(Some(favorite))
    }

    async fn remove(&self, user_id: Uuid, pokemon_id: i32) -> Result<bool, BffError> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| !(f.user_id == user_id && f.pokemon_id == pokemon_id));
        Ok(favorites.len() < before)
    }
}

// ── MockTeamRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockTeamRepo {
    pub teams: Arc<Mutex<Vec<Team>>>,
}

impl MockTeamRepo {
    /// Seed teams for `user_id`, oldest first, one minute apart.
    pub fn seeded(user_id: Uuid, names: &[&str]) -> Self {
        let start = Utc::now() - Duration::hours(1);
        let teams = names
            .iter()
            .enumerate()
            .map(|(i, name)| Team {
                id: Uuid::now_v7(),
                user_id,
                name: (*name).to_owned(),
                pokemons: vec![],
                created_at: start + Duration::minutes(i as i64),
            })
            .collect();
        Self {
            teams: Arc::new(Mutex::new(teams)),
        }
    }

    fn ordered(&self, user_id: Uuid) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .teams
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        teams.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        teams
    }

    fn apply(&self, team_id: Uuid, data: &TeamInput) -> Option<Team> {
        let mut teams = self.teams.lock().unwrap();
        let team = teams.iter_mut().find(|t| t.id == team_id)?;
        team.name = data.name.clone();
        team.pokemons = data.pokemons.clone();
        Some(team.clone())
    }

    fn remove(&self, team_id: Uuid) -> bool {
        let mut teams = self.teams.lock().unwrap();
        let before = teams.len();
        teams.retain(|t| t.id != team_id);
        teams.len() < before
    }
}

impl TeamRepository for MockTeamRepo {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Team>, BffError> {
        Ok(self.ordered(user_id))
    }

    async fn create(&self, team: &Team) -> Result<(), BffError> {
        self.teams.lock().unwrap().push(team.clone());
        Ok(())
    }

    async fn update_at(
        &self,
        user_id: Uuid,
        index: u64,
        data: &TeamInput,
    ) -> Result<Option<Team>, BffError> {
        let Some(target) = self.ordered(user_id).get(index as usize).map(|t| t.id) else {
            return Ok(None);
        };
        Ok(self.apply(target, data))
    }

    async fn delete_at(&self, user_id: Uuid, index: u64) -> Result<bool, BffError> {
        let Some(target) = self.ordered(user_id).get(index as usize).map(|t| t.id) else {
            return Ok(false);
        };
        Ok(self.remove(target))
    }

    async fn update(
        &self,
        user_id: Uuid,
        team_id: Uuid,
        data: &TeamInput,
    ) -> Result<Option<Team>, BffError> {
        if !self.ordered(user_id).iter().any(|t| t.id == team_id) {
            return Ok(None);
        }
        Ok(self.apply(team_id, data))
    }

    async fn delete(&self, user_id: Uuid, team_id: Uuid) -> Result<bool, BffError> {
        if !self.ordered(user_id).iter().any(|t| t.id == team_id) {
            return Ok(false);
        }
        Ok(self.remove(team_id))
    }
}

// ── MockFriendRepo ───────────────────────────────────────────────────────────

/// Friend links as (user_id, friend_id), resolved against a shared user list.
#[derive(Clone, Default)]
pub struct MockFriendRepo {
    pub links: Arc<Mutex<Vec<(Uuid, Uuid)>>>,
    pub users: MockUserRepo,
}

impl MockFriendRepo {
    pub fn new(users: MockUserRepo) -> Self {
        Self {
            links: Arc::default(),
            users,
        }
    }
}

impl FriendRepository for MockFriendRepo {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Friend>, BffError> {
        let users = self.users.users.lock().unwrap();
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|(from, _)| *from == user_id)
            .filter_map(|(_, to)| users.iter().find(|u| u.id == *to))
            .map(|u| Friend {
                user_id: u.id,
                email: u.email.clone(),
                name: u.name.clone(),
                code: u.code.clone(),
                since: Utc::now(),
            })
            .collect())
    }

    async fn add(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), BffError> {
        let mut links = self.links.lock().unwrap();
        for link in [(user_id, friend_id), (friend_id, user_id)] {
            if !links.contains(&link) {
                links.push(link);
            }
        }
        Ok(())
    }
}

// ── MockIdentityProvider ─────────────────────────────────────────────────────

pub struct MockIdentityProvider {
    pub profile: Option<IdentityProfile>,
}

impl MockIdentityProvider {
    pub fn returning(email: &str, display_name: Option<&str>) -> Self {
        Self {
            profile: Some(IdentityProfile {
                email: email.to_owned(),
                display_name: display_name.map(str::to_owned),
            }),
        }
    }

    pub fn failing() -> Self {
        Self { profile: None }
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn authorize_url(&self) -> (Url, String) {
        (
            Url::parse("https://accounts.example/auth?state=fixed").unwrap(),
            "fixed".to_owned(),
        )
    }

    async fn fetch_profile(&self, _code: &str) -> Result<IdentityProfile, BffError> {
        self.profile
            .clone()
            .ok_or_else(|| anyhow::anyhow!("token exchange failed").into())
    }
}

// ── MockCatalog ──────────────────────────────────────────────────────────────

/// Catalog that knows a fixed set of pokemon by lowercase name and records
/// every lookup.
#[derive(Clone, Default)]
pub struct MockCatalog {
    pub known: Vec<&'static str>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCatalog {
    pub fn knowing(known: Vec<&'static str>) -> Self {
        Self {
            known,
            calls: Arc::default(),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CatalogPort for MockCatalog {
    async fn get_pokemon(&self, id_or_name: &str) -> Result<Value, BffError> {
        self.record(format!("pokemon/{id_or_name}"));
        if self.known.contains(&id_or_name) {
            Ok(json!({ "name": id_or_name }))
        } else {
            Err(BffError::Catalog(anyhow::anyhow!("404 for pokemon/{id_or_name}")))
        }
    }

    async fn list_pokemon(&self, limit: u32, offset: u32) -> Result<Value, BffError> {
        self.record(format!("pokemon?limit={limit}&offset={offset}"));
        Ok(json!({ "count": self.known.len(), "results": [] }))
    }

    async fn get_species(&self, id_or_name: &str) -> Result<Value, BffError> {
        self.record(format!("pokemon-species/{id_or_name}"));
        Ok(json!({ "id": id_or_name }))
    }

    async fn get_evolution_chain(&self, id: &str) -> Result<Value, BffError> {
        self.record(format!("evolution-chain/{id}"));
        Ok(json!({ "id": id }))
    }
}

// ── Full application ─────────────────────────────────────────────────────────

/// Router state over an in-memory database, with the catalog and Google
/// endpoints pointed at `upstream`.
pub async fn test_state(upstream: &MockServer) -> AppState {
    let db = pokedex_testing::db::test_database().await;
    let google = GoogleIdentityProvider::new(&GoogleSettings {
        client_id: "test-client".to_owned(),
        client_secret: "test-secret".to_owned(),
        callback_url: Url::parse("http://localhost:4000/auth/google/callback").unwrap(),
        auth_url: Url::parse(&upstream.url("/o/oauth2/v2/auth")).unwrap(),
        token_url: Url::parse(&upstream.url("/token")).unwrap(),
        userinfo_url: Url::parse(&upstream.url("/userinfo")).unwrap(),
    })
    .unwrap();
    AppState {
        db,
        catalog: HttpCatalogClient::new(
            reqwest::Client::new(),
            Url::parse(&upstream.url("/api/v2")).unwrap(),
        ),
        google,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        frontend_url: Url::parse("http://localhost:5173").unwrap(),
        session_key: signing_key("integration-session-secret"),
    }
}
