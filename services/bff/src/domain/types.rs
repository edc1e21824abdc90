use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered account. Password accounts carry a bcrypt hash; accounts created
/// through Google sign-in carry an empty hash and can only log in via Google.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    /// 7-character lowercase base36 code other users add as a friend.
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_oauth_only(&self) -> bool {
        self.password_hash.is_empty()
    }
}

/// Pokemon as the frontend sends it when favoriting. Unknown fields are
/// accepted and kept on the value but never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A favorited pokemon. At most one per (user, pokemon id).
#[derive(Debug, Clone)]
pub struct Favorite {
    pub user_id: Uuid,
    pub pokemon_id: i32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A team member exactly as the client sent it; the shape is the client's business.
pub type TeamMember = serde_json::Value;

/// A named, ordered list of pokemon owned by one user.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub pokemons: Vec<TeamMember>,
    pub created_at: DateTime<Utc>,
}

/// Editable part of a team.
#[derive(Debug, Clone, Default)]
pub struct TeamInput {
    pub name: String,
    pub pokemons: Vec<TeamMember>,
}

/// A user seen from the other side of a friendship.
#[derive(Debug, Clone)]
pub struct Friend {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub code: String,
    pub since: DateTime<Utc>,
}

/// Profile returned by an external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub email: String,
    pub display_name: Option<String>,
}
