pub mod clock;
pub mod gate;
pub mod password;
pub mod token;

pub use clock::{Clock, SystemClock};
pub use gate::{CredentialGate, CredentialRecord};
pub use password::{hash_password, validate_hash, verify_password};
pub use token::{Claims, IssuedToken, TokenSigner, TOKEN_TTL_SECS};
