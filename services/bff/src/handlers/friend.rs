use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::domain::types::Friend;
use crate::error::BffError;
use crate::handlers::caller::Caller;
use crate::state::AppState;
use crate::usecase::friend::{AddFriendUseCase, ListFriendsUseCase};

#[derive(Deserialize)]
pub struct AddFriendRequest {
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct FriendResponse {
    pub email: String,
    pub name: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct FriendsResponse {
    pub friends: Vec<FriendResponse>,
}

impl From<Vec<Friend>> for FriendsResponse {
    fn from(friends: Vec<Friend>) -> Self {
        Self {
            friends: friends
                .into_iter()
                .map(|f| FriendResponse {
                    email: f.email,
                    name: f.name,
                    code: f.code,
                })
                .collect(),
        }
    }
}

// ── GET /api/friends ─────────────────────────────────────────────────────────

pub async fn get_friends(
    Caller(user): Caller,
    State(state): State<AppState>,
) -> Result<Json<FriendsResponse>, BffError> {
    let uc = ListFriendsUseCase {
        friends: state.friend_repo(),
    };
    Ok(Json(uc.execute(&user).await?.into()))
}

// ── POST /api/friends/add ────────────────────────────────────────────────────

pub async fn add_friend(
    Caller(user): Caller,
    State(state): State<AppState>,
    Json(body): Json<AddFriendRequest>,
) -> Result<Json<FriendsResponse>, BffError> {
    let uc = AddFriendUseCase {
        users: state.user_repo(),
        friends: state.friend_repo(),
    };
    let friends = uc
        .execute(&user, body.code.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(friends.into()))
}
