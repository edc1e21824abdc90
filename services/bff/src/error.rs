use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// BFF service error variants.
#[derive(Debug, thiserror::Error)]
pub enum BffError {
    #[error("email and password required")]
    MissingCredentials,
    #[error("{0} required")]
    MissingData(&'static str),
    #[error("user already exists")]
    UserAlreadyExists,
    /// Another account claimed the drawn friend code first. Retried by the
    /// account-creating use cases.
    #[error("friend code already taken")]
    FriendCodeTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("please use Google Sign-In for this account")]
    OAuthOnlyAccount,
    #[error("invalid team index")]
    InvalidTeamIndex,
    #[error("cannot add yourself")]
    CannotAddSelf,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid oauth state")]
    InvalidOAuthState,
    #[error("sign-in was denied: {0}")]
    OAuthDenied(String),
    #[error("no user with that code")]
    FriendNotFound,
    #[error("team not found")]
    TeamNotFound,
    #[error("catalog api error")]
    Catalog(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BffError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::MissingData(_) => "MISSING_DATA",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::FriendCodeTaken => "FRIEND_CODE_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::OAuthOnlyAccount => "OAUTH_ONLY_ACCOUNT",
            Self::InvalidTeamIndex => "INVALID_TEAM_INDEX",
            Self::CannotAddSelf => "CANNOT_ADD_SELF",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidOAuthState => "INVALID_OAUTH_STATE",
            Self::OAuthDenied(_) => "OAUTH_DENIED",
            Self::FriendNotFound => "FRIEND_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::Catalog(_) => "CATALOG_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredentials
            | Self::MissingData(_)
            | Self::UserAlreadyExists
            | Self::InvalidCredentials
            | Self::OAuthOnlyAccount
            | Self::InvalidTeamIndex
            | Self::CannotAddSelf => StatusCode::BAD_REQUEST,
            Self::InvalidToken | Self::InvalidOAuthState | Self::OAuthDenied(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::FriendNotFound | Self::TeamNotFound => StatusCode::NOT_FOUND,
            Self::FriendCodeTaken => StatusCode::CONFLICT,
            Self::Catalog(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BffError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are already recorded by the trace layer; only 5xx carry a cause worth logging.
        match &self {
            Self::Internal(e) | Self::Catalog(e) => {
                tracing::error!(error = ?e, kind = self.kind(), "request failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
