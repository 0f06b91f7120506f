use thiserror::Error;

use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Missing, partial, malformed, expired or revoked credential.
    /// Surfaced to clients as a generic 401 with no distinguishing detail.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Session id collision at creation. Effectively unreachable with
    /// 32 random bytes; surfaced as an internal error, never retried.
    #[error("Session id conflict")]
    Conflict,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Header error: {0}")]
    HeaderError(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
