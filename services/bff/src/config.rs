use anyhow::{Context as _, bail};
use url::Url;

/// BFF configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BffConfig {
    /// TCP port for the HTTP server (default 4000). Env var: `PORT`.
    pub port: u16,
    /// Origin allowed by CORS and target of OAuth redirects. Env var: `FRONTEND_URL`.
    pub frontend_url: Url,
    /// Key material for signing the session cookie. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// HMAC secret for bearer tokens (default `dev_secret`). Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Catalog API root. Env var: `POKEAPI_BASE`.
    pub pokeapi_base: Url,
    pub database: DatabaseSettings,
    pub google: GoogleSettings,
}

/// Postgres connection settings. Env vars: `DB_*`.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn url(&self) -> anyhow::Result<String> {
        let mut url = Url::parse("postgres://localhost").context("base postgres url")?;
        url.set_host(Some(&self.host))
            .with_context(|| format!("invalid DB_HOST {:?}", self.host))?;
        url.set_port(Some(self.port))
            .map_err(|()| anyhow::anyhow!("cannot set DB_PORT"))?;
        url.set_username(&self.user)
            .map_err(|()| anyhow::anyhow!("cannot set DB_USER"))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|()| anyhow::anyhow!("cannot set DB_PASSWORD"))?;
        }
        url.set_path(&self.name);
        Ok(url.into())
    }
}

/// Google OAuth client settings. Env vars: `GOOGLE_*`.
#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: Url,
    pub auth_url: Url,
    pub token_url: Url,
    pub userinfo_url: Url,
}

const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

impl BffConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let session_secret = var("SESSION_SECRET", "session_secret_key");
        if session_secret.is_empty() {
            bail!("SESSION_SECRET must not be empty");
        }

        Ok(Self {
            port: parse(&lookup, "PORT", 4000)?,
            frontend_url: parse_url(
                &var("FRONTEND_URL", "http://localhost:5173"),
                "FRONTEND_URL",
            )?,
            session_secret,
            jwt_secret: var("JWT_SECRET", "dev_secret"),
            pokeapi_base: parse_url(
                &var("POKEAPI_BASE", "https://pokeapi.co/api/v2"),
                "POKEAPI_BASE",
            )?,
            database: DatabaseSettings {
                host: var("DB_HOST", "localhost"),
                port: parse(&lookup, "DB_PORT", 5432)?,
                name: var("DB_NAME", "pokedex"),
                user: var("DB_USER", "postgres"),
                password: var("DB_PASSWORD", ""),
                max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 10)?,
                acquire_timeout_secs: parse(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?,
            },
            google: GoogleSettings {
                client_id: var("GOOGLE_CLIENT_ID", "YOUR_CLIENT_ID"),
                client_secret: var("GOOGLE_CLIENT_SECRET", "YOUR_CLIENT_SECRET"),
                callback_url: parse_url(
                    &var(
                        "GOOGLE_CALLBACK_URL",
                        "http://localhost:4000/auth/google/callback",
                    ),
                    "GOOGLE_CALLBACK_URL",
                )?,
                auth_url: parse_url(
                    &var("GOOGLE_AUTH_URL", DEFAULT_GOOGLE_AUTH_URL),
                    "GOOGLE_AUTH_URL",
                )?,
                token_url: parse_url(
                    &var("GOOGLE_TOKEN_URL", DEFAULT_GOOGLE_TOKEN_URL),
                    "GOOGLE_TOKEN_URL",
                )?,
                userinfo_url: parse_url(
                    &var("GOOGLE_USERINFO_URL", DEFAULT_GOOGLE_USERINFO_URL),
                    "GOOGLE_USERINFO_URL",
                )?,
            },
        })
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_url(raw: &str, key: &str) -> anyhow::Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid {key}: {raw:?}"))
}
