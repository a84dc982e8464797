//! Keyed hashing of verification codes

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::{DomainError, DomainResult};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over plaintext codes, rendered as lowercase hex
#[derive(Clone)]
pub struct CodeHasher {
    mac: HmacSha256,
}

impl CodeHasher {
    /// Key the hasher with the server secret
    pub fn new(secret: &[u8]) -> DomainResult<Self> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|e| DomainError::Internal {
            message: format!("Invalid HMAC key: {}", e),
        })?;
        Ok(Self { mac })
    }

    /// Hash a code
    pub fn hash(&self, code: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(code.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Compare a code against a stored hash in constant time
    pub fn verify(&self, code: &str, stored_hash: &str) -> bool {
        let candidate = self.hash(code);
        constant_time_eq(candidate.as_bytes(), stored_hash.as_bytes())
    }
}
