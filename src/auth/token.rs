use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::clock::Clock;
use crate::error::AuthError;

/// Tokens are valid for exactly one hour after issuance
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Payload embedded in every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// HS256 signer whose notion of "now" comes from an injected clock
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenSigner {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        // exp is compared against `clock` in `verify`, not against system time
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    pub fn issue(&self, id: &str, username: &str) -> Result<IssuedToken, AuthError> {
        let iat = self.clock.now().timestamp();
        let claims = Claims {
            id: id.to_string(),
            username: username.to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, claims })
    }

    /// Expired once `now >= exp`
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!(error = %e, "token rejected");
            AuthError::InvalidToken
        })?;

        if self.clock.now().timestamp() >= data.claims.exp {
            warn!(username = %data.claims.username, exp = data.claims.exp, "token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}
