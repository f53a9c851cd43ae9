//! Password checks for the login and reset flows.

use std::borrow::Cow;

use argon2::password_hash::Error as HashError;
use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::AuthError;

/// Prepend the server-side pepper, when one is configured.
fn peppered<'a>(password: &'a str, pepper: Option<&str>) -> Cow<'a, [u8]> {
    match pepper {
        Some(p) => Cow::Owned(format!("{p}{password}").into_bytes()),
        None => Cow::Borrowed(password.as_bytes()),
    }
}

/// Check a plaintext password against a stored PHC-format Argon2id
/// hash. `Ok(false)` is an ordinary mismatch; `Err` means the stored
/// hash itself could not be used.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("stored hash is unusable: {e}")))?;

    match Argon2::default().verify_password(&peppered(password, pepper), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;

    fn hash(password: &str, pepper: Option<&str>) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(&peppered(password, pepper), &salt)
            .expect("hashing failed")
            .to_string()
    }

    #[test]
    fn verifies_correct_password() {
        let stored = hash("Sup3rSecret!", None);
        assert!(verify_password("Sup3rSecret!", &stored, None).unwrap());
        assert!(!verify_password("WrongPassword", &stored, None).unwrap());
    }

    #[test]
    fn pepper_must_match() {
        let stored = hash("Sup3rSecret!", Some("pepper"));
        assert!(verify_password("Sup3rSecret!", &stored, Some("pepper")).unwrap());
        assert!(!verify_password("Sup3rSecret!", &stored, None).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("x", "not-a-hash", None).is_err());
    }
}
