use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::ConfigError;

const DEFAULT_JWT_SECRET: &str = "default_secret_key";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

/// How the single admin password is supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminPassword {
    /// Argon2 PHC string
    Hash(String),
    /// Plaintext hashed once at startup (development only)
    Plain(String),
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub id: String,
    pub username: String,
    pub password: AdminPassword,
}

/// Process configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub odds_file_path: PathBuf,
    pub odds_cache_ttl: Duration,
    pub admin: AdminConfig,
    pub cors_origin: String,
    pub log_level: String,
}

impl AppConfig {
    /// Load from process environment. Call `dotenv::dotenv()` first to honour a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = Environment::parse(&var("APP_ENV").unwrap_or_default());
        let production = environment == Environment::Production;

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if production => return Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                warn!("JWT_SECRET not set, using the development default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let password = match (var("ADMIN_PASSWORD_HASH"), var("ADMIN_PASSWORD")) {
            (Some(hash), _) => AdminPassword::Hash(hash),
            (None, _) if production => return Err(ConfigError::Missing("ADMIN_PASSWORD_HASH")),
            (None, Some(plain)) => AdminPassword::Plain(plain),
            (None, None) => {
                warn!("ADMIN_PASSWORD_HASH not set, using the development default password");
                AdminPassword::Plain(DEFAULT_ADMIN_PASSWORD.to_string())
            }
        };

        let odds_cache_secs: u64 = parse_or(&var, "ODDS_CACHE_TTL_SECS", 0)?;

        // Credentialed CORS cannot be combined with a wildcard origin
        let cors_origin = var("CORS_ORIGIN")
            .map(|origin| origin.trim().to_string())
            .unwrap_or_else(|| "http://localhost:4000".to_string());
        if cors_origin.contains('*') {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGIN",
                reason: "a wildcard origin cannot be used with credentials".to_string(),
            });
        }

        Ok(Self {
            environment,
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&var, "PORT", 3000)?,
            jwt_secret,
            odds_file_path: var("ODDS_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("scraper/sports_odds.json")),
            odds_cache_ttl: Duration::from_secs(odds_cache_secs),
            admin: AdminConfig {
                id: var("ADMIN_ID").unwrap_or_else(|| "1".to_string()),
                username: var("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
                password,
            },
            cors_origin,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
