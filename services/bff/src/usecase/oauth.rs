use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{IdentityProvider, UserRepository};
use crate::domain::types::User;
use crate::error::BffError;
use crate::usecase::auth::{AuthOutput, create_with_code, sign_in};

// ── CompleteGoogleLogin ──────────────────────────────────────────────────────

/// Finish the provider handshake: fetch the profile behind `code`, create a
/// passwordless account on first sign-in, and issue a bearer token.
pub struct CompleteGoogleLoginUseCase<U: UserRepository, P: IdentityProvider> {
    pub users: U,
    pub provider: P,
    pub jwt_secret: String,
}

impl<U: UserRepository, P: IdentityProvider> CompleteGoogleLoginUseCase<U, P> {
    pub async fn execute(&self, code: &str) -> Result<AuthOutput, BffError> {
        let profile = self.provider.fetch_profile(code).await?;

        if let Some(user) = self.users.find_by_email(&profile.email).await? {
            return sign_in(user, &self.jwt_secret);
        }

        let name = profile
            .display_name
            .unwrap_or_else(|| local_part(&profile.email).to_owned());
        let user = User {
            id: Uuid::now_v7(),
            email: profile.email,
            name,
            password_hash: String::new(),
            code: String::new(),
            created_at: Utc::now(),
        };
        let user = create_with_code(&self.users, user).await?;
        tracing::info!(user_id = %user.id, "created account from google sign-in");
        sign_in(user, &self.jwt_secret)
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
