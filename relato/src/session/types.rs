use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sqlx::FromRow;
use uuid::Uuid;

use crate::session::config::{PROFILE_COOKIE_NAME, SESSION_COOKIE_NAME};

/// Claims carried by the HTTP-only `session` cookie: the authority
/// credential. The `nonce` changes on every issuance so the signed bytes of
/// a renewed token never match the bytes of the token it replaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// User id
    pub sub: Uuid,
    /// Opaque session id, the key into the session table
    pub sid: String,
    /// Expiry as unix seconds
    pub exp: i64,
    pub nonce: String,
}

/// Claims carried by the script-readable `profile` cookie. Denormalized
/// display data only; never consulted for authorization beyond identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileClaims {
    /// User id
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    /// Expiry as unix seconds
    pub exp: i64,
    pub nonce: String,
}

/// Behavior shared by the two cookie-borne token types, used by the token
/// codec and the renewal policy.
pub(crate) trait CookieToken: Serialize + DeserializeOwned + Clone {
    fn cookie_name() -> &'static str;
    fn http_only() -> bool;
    fn expires_at(&self) -> i64;
    fn renew(&mut self, expires_at: i64, nonce: String);
}

impl CookieToken for SessionClaims {
    fn cookie_name() -> &'static str {
        SESSION_COOKIE_NAME.as_str()
    }

    fn http_only() -> bool {
        true
    }

    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn renew(&mut self, expires_at: i64, nonce: String) {
        self.exp = expires_at;
        self.nonce = nonce;
    }
}

impl CookieToken for ProfileClaims {
    fn cookie_name() -> &'static str {
        PROFILE_COOKIE_NAME.as_str()
    }

    fn http_only() -> bool {
        false
    }

    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn renew(&mut self, expires_at: i64, nonce: String) {
        self.exp = expires_at;
        self.nonce = nonce;
    }
}

/// A persisted login session. One row per active login/device; the row's
/// existence is the source of truth for revocation, independent of token
/// validity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Request-scoped identity assembled from verified token claims.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub session_id: String,
}
