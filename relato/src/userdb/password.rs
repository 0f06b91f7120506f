//! bcrypt password hashing. Verification is deliberately silent about the
//! reason for a mismatch.

use crate::userdb::errors::UserError;

pub(crate) fn hash_password(password: &str) -> Result<String, UserError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| UserError::Password(e.to_string()))
}

/// Check a candidate password against a stored bcrypt hash. A malformed
/// stored hash counts as a mismatch rather than an error so login failures
/// stay indistinguishable to the caller.
pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse battery staple").expect("hash");
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = hash_password("same input").expect("hash");
        let h2 = hash_password("same input").expect("hash");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_malformed_stored_hash_is_a_mismatch() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
