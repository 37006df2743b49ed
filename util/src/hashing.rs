//! Salted SHA-256 hashing for phone verification and session tokens.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `input` concatenated with the salt.
///
/// The same salt must be used when hashing for storage and when hashing for
/// comparison, otherwise verification can never match.
pub fn sha256_hex(input: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher.update(b"|");
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic_and_salted() {
        let a = sha256_hex("01012345678", "salt-a");
        let b = sha256_hex("01012345678", "salt-a");
        let c = sha256_hex("01012345678", "salt-b");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
