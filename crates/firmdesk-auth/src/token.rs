//! Token generation and hashing.
//!
//! Session tokens are random and opaque; only their SHA-256 digest is
//! stored server-side. Password-reset tokens are derived from the
//! account e-mail and a server secret, so a link can be re-issued
//! without keeping plaintext tokens around.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a fresh opaque session token (32 random bytes,
/// URL-safe base64 without padding).
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hash a token for storage and lookup.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}

/// Derive a password-reset token for an account e-mail.
pub fn reset_token_for_email(email: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_tokens_are_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        assert!(a.len() >= 40);
    }

    #[test]
    fn token_hash_is_stable_hex() {
        let h1 = hash_token("abc");
        let h2 = hash_token("abc");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn reset_token_depends_on_email_and_secret() {
        let t1 = reset_token_for_email("ivanov@example.com", "s1");
        let t2 = reset_token_for_email("ivanov@example.com", "s2");
        let t3 = reset_token_for_email("petrov@example.com", "s1");
        assert_ne!(t1, t2);
        assert_ne!(t1, t3);
        assert_eq!(t1, reset_token_for_email("ivanov@example.com", "s1"));
    }
}
