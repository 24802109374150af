use std::sync::Arc;

use crate::auth::{hash_password, CredentialGate, CredentialRecord, SystemClock};
use crate::config::{AdminPassword, AppConfig};
use crate::error::AuthError;
use crate::odds::OddsRepository;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<CredentialGate>,
    pub odds: Arc<OddsRepository>,
    /// Include error cause chains in 500 responses (never in production)
    pub expose_error_detail: bool,
}

impl AppState {
    pub fn new(gate: CredentialGate, odds: OddsRepository, expose_error_detail: bool) -> Self {
        Self {
            gate: Arc::new(gate),
            odds: Arc::new(odds),
            expose_error_detail,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        let password_hash = match &config.admin.password {
            AdminPassword::Hash(hash) => hash.clone(),
            AdminPassword::Plain(plain) => hash_password(plain)?,
        };

        let record = CredentialRecord {
            id: config.admin.id.clone(),
            username: config.admin.username.clone(),
            password_hash,
        };
        let gate = CredentialGate::new(record, config.jwt_secret.as_bytes(), Arc::new(SystemClock))?;
        let odds = OddsRepository::with_cache_ttl(&config.odds_file_path, config.odds_cache_ttl);

        Ok(Self::new(gate, odds, !config.is_production()))
    }
}
