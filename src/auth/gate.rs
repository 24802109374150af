use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::clock::Clock;
use crate::auth::password::{validate_hash, verify_password};
use crate::auth::token::{Claims, IssuedToken, TokenSigner};
use crate::error::AuthError;

/// The single account allowed through the gate
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String, // Argon2 PHC string
}

/// Checks logins against one credential record and issues tokens for it.
///
/// Everything the gate needs is passed in at construction. It keeps no
/// session state, so every login and verification is independent.
pub struct CredentialGate {
    record: CredentialRecord,
    signer: TokenSigner,
}

impl CredentialGate {
    pub fn new(
        record: CredentialRecord,
        secret: &[u8],
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthError> {
        validate_hash(&record.password_hash)?;
        Ok(Self {
            record,
            signer: TokenSigner::new(secret, clock),
        })
    }

    /// Blocking: runs an Argon2 verification. Async callers should use `spawn_blocking`.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        // The hash is checked even for an unknown user so both failures cost the same
        let known_user = self.record.username.to_lowercase() == username.to_lowercase();
        let password_ok = verify_password(&self.record.password_hash, password)?;

        if !known_user {
            warn!(username, "login failed: unknown user");
            return Err(AuthError::InvalidCredentials);
        }
        if !password_ok {
            warn!(username, "login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.signer.issue(&self.record.id, &self.record.username)?;
        info!(username = %issued.claims.username, exp = issued.claims.exp, "login successful");
        Ok(issued)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.signer.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::cheap_hash;
    use crate::auth::token::tests::{start, ManualClock};
    use crate::auth::token::TOKEN_TTL_SECS;
    use chrono::Duration;

    fn gate_with(clock: Arc<dyn Clock>) -> CredentialGate {
        let record = CredentialRecord {
            id: "1".to_string(),
            username: "admin".to_string(),
            password_hash: cheap_hash("admin123"),
        };
        CredentialGate::new(record, b"secret", clock).unwrap()
    }

    #[test]
    fn test_login_then_verify() {
        let gate = gate_with(ManualClock::at(start()));
        let issued = gate.login("admin", "admin123").unwrap();
        let claims = gate.verify(&issued.token).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.id, "1");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_username_is_case_insensitive() {
        let gate = gate_with(ManualClock::at(start()));
        let issued = gate.login("ADMIN", "admin123").unwrap();
        assert_eq!(gate.verify(&issued.token).unwrap().username, "admin");
    }

    #[test]
    fn test_invalid_credentials_are_indistinguishable() {
        let gate = gate_with(ManualClock::at(start()));
        let cases = [("root", "admin123"), ("admin", "wrong"), ("root", "wrong"), ("", "")];
        for (username, password) in cases {
            let err = gate.login(username, password).unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    #[test]
    fn test_password_is_case_sensitive() {
        let gate = gate_with(ManualClock::at(start()));
        assert!(matches!(
            gate.login("admin", "ADMIN123"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_token_expires_after_an_hour() {
        let clock = ManualClock::at(start());
        let gate = gate_with(clock.clone());
        let issued = gate.login("admin", "admin123").unwrap();

        clock.advance(Duration::minutes(59));
        assert!(gate.verify(&issued.token).is_ok());

        clock.advance(Duration::minutes(1));
        assert!(matches!(gate.verify(&issued.token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_unknown_user_still_checks_password_hash() {
        // bypass `new` so a broken hash shows whether Argon2 ran at all
        let gate = CredentialGate {
            record: CredentialRecord {
                id: "1".to_string(),
                username: "admin".to_string(),
                password_hash: "plaintext".to_string(),
            },
            signer: TokenSigner::new(b"secret", ManualClock::at(start())),
        };
        assert!(matches!(
            gate.login("root", "admin123"),
            Err(AuthError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_record_hash() {
        let record = CredentialRecord {
            id: "1".to_string(),
            username: "admin".to_string(),
            password_hash: "plaintext".to_string(),
        };
        assert!(matches!(
            CredentialGate::new(record, b"secret", ManualClock::at(start())),
            Err(AuthError::MalformedHash(_))
        ));
    }
}
