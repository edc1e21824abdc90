use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::domain::types::User;
use crate::error::BffError;
use crate::infra::session::LoginSession;
use crate::state::AppState;
use crate::usecase::auth::{AuthOutput, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
    pub code: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            code: user.code.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthOutput> for AuthResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            user: UserResponse::from(&output.user),
            token: output.token,
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, BffError> {
    let uc = RegisterUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = uc
        .execute(RegisterInput {
            email: body.email.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            name: body.name,
        })
        .await?;
    Ok(Json(output.into()))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BffError> {
    let uc = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = uc
        .execute(LoginInput {
            email: body.email.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
        })
        .await?;
    Ok(Json(output.into()))
}

// ── GET /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(session: Session) -> Result<Json<Value>, BffError> {
    let login = LoginSession::new(&session);
    if let Some(email) = login.email().await? {
        tracing::debug!(%email, "ending login session");
    }
    login.end().await?;
    Ok(Json(json!({ "message": "Logged out successfully" })))
}
