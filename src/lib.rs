pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod odds;
pub mod utils;

pub use api::{router, AppState};
pub use auth::{Claims, CredentialGate, CredentialRecord};
pub use config::AppConfig;
pub use error::{ApiError, AuthError, ConfigError, SnapshotError};
pub use models::*;
pub use odds::OddsRepository;
