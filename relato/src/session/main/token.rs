//! Token codec: signs and verifies the compact claims-bearing tokens carried
//! by the session and profile cookies. Pure functions, no I/O.
//!
//! Both token kinds are signed with the same process-wide symmetric secret
//! (HS256). Claim presence is enforced by the typed claim structs: a token
//! missing a required claim fails deserialization and verification.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};

use crate::session::config::WEB_SESSION_SECRET;
use crate::session::errors::SessionError;

pub(crate) fn sign_token<T: Serialize>(claims: &T) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(&WEB_SESSION_SECRET),
    )
    .map_err(|e| SessionError::Crypto(e.to_string()))
}

/// Verify signature and expiry, then deserialize the claims.
///
/// Fails with `Unauthenticated` when the signature does not match, the token
/// is malformed, `exp` is in the past, or a required claim is absent. The
/// caller never learns which check failed.
pub(crate) fn verify_token<T: DeserializeOwned>(token: &str) -> Result<T, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<T>(
        token,
        &DecodingKey::from_secret(&WEB_SESSION_SECRET),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        SessionError::Unauthenticated
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::{ProfileClaims, SessionClaims};
    use chrono::Utc;
    use uuid::Uuid;

    fn future_exp() -> i64 {
        Utc::now().timestamp() + 600
    }

    fn session_claims() -> SessionClaims {
        SessionClaims {
            sub: Uuid::new_v4(),
            sid: "s".repeat(43),
            exp: future_exp(),
            nonce: "nonce-1".to_string(),
        }
    }

    #[test]
    fn test_sign_then_verify_session_claims() {
        let claims = session_claims();
        let token = sign_token(&claims).expect("sign");
        let verified: SessionClaims = verify_token(&token).expect("verify");
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_sign_then_verify_profile_claims() {
        let claims = ProfileClaims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            exp: future_exp(),
            nonce: "nonce-2".to_string(),
        };
        let token = sign_token(&claims).expect("sign");
        let verified: ProfileClaims = verify_token(&token).expect("verify");
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_expired_token_fails_even_with_valid_signature() {
        let mut claims = session_claims();
        claims.exp = Utc::now().timestamp() - 60;
        let token = sign_token(&claims).expect("sign");
        let result: Result<SessionClaims, _> = verify_token(&token);
        assert!(matches!(result, Err(SessionError::Unauthenticated)));
    }

    #[test]
    fn test_tampered_token_fails() {
        let token = sign_token(&session_claims()).expect("sign");
        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().expect("non-empty token");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        let result: Result<SessionClaims, _> = verify_token(&tampered);
        assert!(matches!(result, Err(SessionError::Unauthenticated)));
    }

    #[test]
    fn test_malformed_token_fails() {
        let result: Result<SessionClaims, _> = verify_token("not-a-token");
        assert!(matches!(result, Err(SessionError::Unauthenticated)));
    }

    #[test]
    fn test_missing_required_claim_fails() {
        // A session token does not carry username/email, so it must not
        // verify as a profile token
        let token = sign_token(&session_claims()).expect("sign");
        let result: Result<ProfileClaims, _> = verify_token(&token);
        assert!(matches!(result, Err(SessionError::Unauthenticated)));
    }
}
