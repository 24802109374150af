use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::error::AuthError;

/// Hash a password into an Argon2id PHC string with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::MalformedHash(format!("password hash error: {e}")))?
        .to_string();
    Ok(hash)
}

/// Check that a PHC string parses, so a bad `ADMIN_PASSWORD_HASH` fails at startup
pub fn validate_hash(hash: &str) -> Result<(), AuthError> {
    PasswordHash::new(hash)
        .map(|_| ())
        .map_err(|e| AuthError::MalformedHash(e.to_string()))
}

/// Returns `Ok(false)` on a wrong password; `Err` only when the stored hash is unusable.
/// Cost parameters are read from the PHC string itself.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::MalformedHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::MalformedHash(e.to_string())),
    }
}

/// Low-cost hash for tests; production hashes use `Argon2::default()`
#[cfg(test)]
pub(crate) fn cheap_hash(password: &str) -> String {
    use argon2::{Algorithm, Params, Version};

    let params = Params::new(1024, 1, 1, None).unwrap();
    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "admin123").unwrap());
        assert!(!verify_password(&hash, "admin124").unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let a = cheap_hash("admin123");
        let b = cheap_hash("admin123");
        assert_ne!(a, b);
        assert!(verify_password(&a, "admin123").unwrap());
        assert!(verify_password(&b, "admin123").unwrap());
    }

    #[test]
    fn test_malformed_hash() {
        assert!(matches!(
            verify_password("not-a-phc-string", "admin123"),
            Err(AuthError::MalformedHash(_))
        ));
        assert!(validate_hash("not-a-phc-string").is_err());
        assert!(validate_hash(&cheap_hash("x")).is_ok());
    }
}
