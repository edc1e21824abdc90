use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::BffError;

// ── GetCaller ────────────────────────────────────────────────────────────────

/// Resolve the account behind a verified token. A token for an email with no
/// account is as good as no token.
pub struct GetCallerUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetCallerUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<User, BffError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(BffError::InvalidToken)
    }
}
