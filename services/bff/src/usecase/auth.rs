use anyhow::{Context as _, anyhow};
use chrono::Utc;
use rand::RngExt;
use uuid::Uuid;

use pokedex_auth_types::token::issue_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::BffError;

/// bcrypt work factor for new password hashes.
pub const BCRYPT_COST: u32 = 10;

/// Length of a friend code.
pub const USER_CODE_LEN: usize = 7;

/// Attempts at drawing an unused friend code before giving up.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Charset for friend codes (lowercase base36).
const CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..USER_CODE_LEN)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Draw a friend code no existing account uses.
async fn allocate_code<U: UserRepository>(users: &U) -> Result<String, BffError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_code();
        if users.find_by_code(&code).await?.is_none() {
            return Ok(code);
        }
    }
    Err(anyhow!("no unused friend code after {MAX_CODE_ATTEMPTS} attempts").into())
}

/// Insert `user` under a fresh friend code, drawing again when a concurrent
/// insert claims the code between the check and the write.
pub(crate) async fn create_with_code<U: UserRepository>(
    users: &U,
    mut user: User,
) -> Result<User, BffError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        user.code = allocate_code(users).await?;
        match users.create(&user).await {
            Err(BffError::FriendCodeTaken) => {
                tracing::debug!(code = %user.code, "friend code taken, drawing again");
            }
            Err(e) => return Err(e),
            Ok(()) => return Ok(user),
        }
    }
    Err(anyhow!("friend code kept colliding after {MAX_CODE_ATTEMPTS} attempts").into())
}

/// Sign a bearer token for `user`.
pub(crate) fn sign_in(user: User, jwt_secret: &str) -> Result<AuthOutput, BffError> {
    let (token, _exp) = issue_token(&user.email, jwt_secret).context("issue token")?;
    Ok(AuthOutput { token, user })
}

async fn hash_password(password: String) -> Result<String, BffError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .context("join password hasher")?
        .context("hash password")?;
    Ok(hash)
}

async fn verify_password(password: String, hash: String) -> Result<bool, BffError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("join password verifier")?
        .context("verify password")?;
    Ok(matches)
}

/// A signed-in account and its bearer token.
#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, BffError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(BffError::MissingCredentials);
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(BffError::UserAlreadyExists);
        }
        let password_hash = hash_password(input.password).await?;
        let user = User {
            id: Uuid::now_v7(),
            email: input.email,
            name: input.name.unwrap_or_default(),
            password_hash,
            code: String::new(),
            created_at: Utc::now(),
        };
        // A concurrent registration can still win the race; the unique index decides.
        let user = create_with_code(&self.users, user).await?;
        sign_in(user, &self.jwt_secret)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, BffError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(BffError::MissingCredentials);
        }
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(BffError::InvalidCredentials)?;
        if user.is_oauth_only() {
            return Err(BffError::OAuthOnlyAccount);
        }
        if !verify_password(input.password, user.password_hash.clone()).await? {
            return Err(BffError::InvalidCredentials);
        }
        sign_in(user, &self.jwt_secret)
    }
}
